//! Greedy per-segment charging stop selection.
//!
//! The route is cut into `required_stops + 1` segments. For each of the
//! first `required_stops` segments the quartile points are probed in order
//! and the first station that is not a duplicate of an already accepted one
//! becomes that segment's stop. The last segment is the final leg to the
//! destination and is never searched.
//!
//! There is no global optimization of detour or price: at most one stop per
//! segment, deduplicated across the whole route. A segment where nothing
//! usable turns up contributes no stop.

use crate::collaborators::{Lookup, StationResolver};
use crate::models::{ChargingStation, GeoPoint};
use crate::partition::partition;
use crate::rules::PlanningRules;

/// Stops picked along a route, plus what could not be filled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopAssembly {
    pub stops: Vec<ChargingStation>,
    pub segments_without_stop: Vec<usize>,
    pub unavailable_lookups: usize,
}

/// True if `candidate` lies within `threshold_deg` of an accepted station on
/// both latitude and longitude.
pub fn is_duplicate_station(
    candidate: &ChargingStation,
    accepted: &[ChargingStation],
    threshold_deg: f64,
) -> bool {
    accepted.iter().any(|existing| {
        (existing.position.lat - candidate.position.lat).abs() < threshold_deg
            && (existing.position.lon - candidate.position.lon).abs() < threshold_deg
    })
}

pub struct StopAssembler<'a> {
    resolver: &'a dyn StationResolver,
    rules: &'a PlanningRules,
}

impl<'a> StopAssembler<'a> {
    pub fn new(resolver: &'a dyn StationResolver, rules: &'a PlanningRules) -> Self {
        Self { resolver, rules }
    }

    /// Pick up to `required_stops` stations along `points`, in travel order.
    ///
    /// Lookups are issued one at a time; a failed or empty lookup just moves
    /// on to the next candidate point.
    pub async fn assemble(&self, points: &[GeoPoint], required_stops: usize) -> StopAssembly {
        let mut assembly = StopAssembly::default();
        if required_stops == 0 {
            return assembly;
        }

        let segments = partition(points, required_stops + 1);
        for index in 0..required_stops {
            let Some(segment) = segments.get(&index) else {
                continue;
            };

            let mut accepted = false;
            for point in segment.search_points() {
                match self
                    .resolver
                    .find_nearest_station(point, self.rules.search_radius_deg)
                    .await
                {
                    Lookup::Found(station) => {
                        if !is_duplicate_station(
                            &station,
                            &assembly.stops,
                            self.rules.duplicate_threshold_deg,
                        ) {
                            assembly.stops.push(station);
                            accepted = true;
                            break;
                        }
                    }
                    Lookup::NotFound => {}
                    Lookup::Unavailable(_) => assembly.unavailable_lookups += 1,
                }
            }

            if !accepted {
                assembly.segments_without_stop.push(index);
            }
        }

        assembly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::StationLookup;
    use crate::distance::route_distance_km;
    use crate::stops::required_stops_with_rules;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Resolver driven by a closure, recording every probed point.
    struct FnResolver<F> {
        answer: F,
        calls: Mutex<Vec<GeoPoint>>,
    }

    impl<F> FnResolver<F>
    where
        F: Fn(GeoPoint) -> StationLookup + Send + Sync,
    {
        fn new(answer: F) -> Self {
            Self {
                answer,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<GeoPoint> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl<F> StationResolver for FnResolver<F>
    where
        F: Fn(GeoPoint) -> StationLookup + Send + Sync,
    {
        async fn find_nearest_station(
            &self,
            point: GeoPoint,
            _search_radius_deg: f64,
        ) -> StationLookup {
            self.calls.lock().unwrap().push(point);
            (self.answer)(point)
        }
    }

    fn station_at(point: GeoPoint) -> ChargingStation {
        ChargingStation {
            position: point,
            name: format!("Station {:.4},{:.4}", point.lon, point.lat),
            address: None,
        }
    }

    /// Straight east-bound route with 1 km legs.
    fn straight_route(legs: usize) -> Vec<GeoPoint> {
        (0..=legs)
            .map(|i| GeoPoint::new(i as f64 / 111.0, 0.0))
            .collect()
    }

    #[tokio::test]
    async fn one_stop_per_searched_segment_in_travel_order() {
        let rules = PlanningRules::default();
        let points = straight_route(300);
        let distance = route_distance_km(&points);
        assert!((distance - 300.0).abs() < 1e-6);

        let required = required_stops_with_rules(distance, 150.0, &rules);
        assert_eq!(required, 3);

        let resolver = FnResolver::new(|point: GeoPoint| Lookup::Found(station_at(point)));
        let assembly = StopAssembler::new(&resolver, &rules)
            .assemble(&points, required)
            .await;

        // 301 points into 4 segments: 76, 75, 75, 75
        assert_eq!(assembly.stops.len(), 3);
        assert_eq!(assembly.stops[0].position, points[19]);
        assert_eq!(assembly.stops[1].position, points[76 + 18]);
        assert_eq!(assembly.stops[2].position, points[151 + 18]);
        assert!(assembly.segments_without_stop.is_empty());
        // first candidate accepted in each segment; final leg never searched
        assert_eq!(resolver.calls().len(), 3);
    }

    #[tokio::test]
    async fn zero_required_stops_issues_no_lookup() {
        let rules = PlanningRules::default();
        let points = straight_route(50);
        let resolver = FnResolver::new(|point: GeoPoint| Lookup::Found(station_at(point)));

        let assembly = StopAssembler::new(&resolver, &rules)
            .assemble(&points, 0)
            .await;

        assert!(assembly.stops.is_empty());
        assert!(resolver.calls().is_empty());
    }

    #[tokio::test]
    async fn near_identical_station_is_kept_once() {
        let rules = PlanningRules::default();
        let points = straight_route(120);
        // Every probe lands on the same station give or take ~3 m.
        let resolver = FnResolver::new(|point: GeoPoint| {
            let jitter = if point.lon > 0.5 { 0.00003 } else { 0.0 };
            Lookup::Found(station_at(GeoPoint::new(0.2 + jitter, 0.0)))
        });

        let assembly = StopAssembler::new(&resolver, &rules)
            .assemble(&points, 3)
            .await;

        assert_eq!(assembly.stops.len(), 1);
        assert_eq!(assembly.segments_without_stop, vec![1, 2]);
        // segment 0 stops after one probe, segments 1 and 2 try all three
        assert_eq!(resolver.calls().len(), 7);
    }

    #[tokio::test]
    async fn duplicate_candidate_falls_through_to_next_quartile() {
        let rules = PlanningRules::default();
        let points = straight_route(99); // 100 points, 2 segments of 50
        let shared = GeoPoint::new(10.0, 10.0);
        let second_segment_start = points[50].lon;

        let resolver = FnResolver::new(move |point: GeoPoint| {
            if point.lon < second_segment_start {
                Lookup::Found(station_at(shared))
            } else {
                Lookup::Found(station_at(point))
            }
        });

        let assembly = StopAssembler::new(&resolver, &rules)
            .assemble(&points, 1)
            .await;
        assert_eq!(assembly.stops.len(), 1);
        assert_eq!(assembly.stops[0].position, shared);

        let assembly = StopAssembler::new(&resolver, &rules)
            .assemble(&points, 2)
            .await;
        // 100 points into 3 segments: 34, 33, 33. Segment 1 quartiles are
        // points 42, 50, 58; 42 hits the shared station, 50 is accepted.
        assert_eq!(assembly.stops.len(), 2);
        assert_eq!(assembly.stops[0].position, shared);
        assert_eq!(assembly.stops[1].position, points[50]);
    }

    #[tokio::test]
    async fn missing_and_unreachable_lookups_advance_to_next_candidate() {
        let rules = PlanningRules::default();
        let points = straight_route(99);
        let calls = Mutex::new(0usize);
        let resolver = FnResolver::new(move |point: GeoPoint| {
            let mut count = calls.lock().unwrap();
            *count += 1;
            match *count {
                1 => Lookup::NotFound,
                2 => Lookup::Unavailable("connection refused".to_string()),
                _ => Lookup::Found(station_at(point)),
            }
        });

        let assembly = StopAssembler::new(&resolver, &rules)
            .assemble(&points, 1)
            .await;

        // 100 points into 2 segments of 50: quartiles 12, 25, 37
        assert_eq!(assembly.stops.len(), 1);
        assert_eq!(assembly.stops[0].position, points[37]);
        assert_eq!(assembly.unavailable_lookups, 1);
        assert!(assembly.segments_without_stop.is_empty());
    }

    #[tokio::test]
    async fn segment_without_any_station_contributes_nothing() {
        let rules = PlanningRules::default();
        let points = straight_route(200);
        let middle = points[100].lon;
        let resolver = FnResolver::new(move |point: GeoPoint| {
            if point.lon < middle {
                Lookup::NotFound
            } else {
                Lookup::Found(station_at(point))
            }
        });

        let assembly = StopAssembler::new(&resolver, &rules)
            .assemble(&points, 3)
            .await;

        // segments 0 and 1 sit entirely before the midpoint
        assert_eq!(assembly.stops.len(), 1);
        assert_eq!(assembly.segments_without_stop, vec![0, 1]);
    }

    #[tokio::test]
    async fn output_is_bounded_and_free_of_duplicates() {
        let rules = PlanningRules::default();
        // Zig-zag route; stations snapped to a coarse grid to provoke near-duplicates.
        let points: Vec<GeoPoint> = (0..500)
            .map(|i| {
                let t = i as f64;
                GeoPoint::new(t * 0.00007, (t * 0.3).sin() * 0.0002)
            })
            .collect();
        let resolver = FnResolver::new(|point: GeoPoint| {
            let snap = |v: f64| (v / 0.00015).round() * 0.00015;
            Lookup::Found(station_at(GeoPoint::new(snap(point.lon), snap(point.lat))))
        });

        for required in 0..=10 {
            let assembly = StopAssembler::new(&resolver, &rules)
                .assemble(&points, required)
                .await;
            assert!(assembly.stops.len() <= required);
            for (i, a) in assembly.stops.iter().enumerate() {
                for b in &assembly.stops[i + 1..] {
                    let close = (a.position.lat - b.position.lat).abs() < 0.0001
                        && (a.position.lon - b.position.lon).abs() < 0.0001;
                    assert!(!close, "duplicate stops {a:?} and {b:?}");
                }
            }
        }
    }

    #[test]
    fn duplicate_check_requires_both_axes_close() {
        let accepted = vec![station_at(GeoPoint::new(2.0, 48.0))];
        let near = station_at(GeoPoint::new(2.00005, 48.00005));
        let same_lat_far_lon = station_at(GeoPoint::new(2.001, 48.0));

        assert!(is_duplicate_station(&near, &accepted, 0.0001));
        assert!(!is_duplicate_station(&same_lat_far_lon, &accepted, 0.0001));
        assert!(!is_duplicate_station(&near, &[], 0.0001));
    }
}
