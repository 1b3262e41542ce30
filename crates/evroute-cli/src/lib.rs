//! Command line client for the EV route planner.
//!
//! Talks to a running `evroute-server` over its REST API.

pub mod client;
pub mod report;

pub use client::PlannerClient;
pub use report::{format_plan, format_vehicles};
