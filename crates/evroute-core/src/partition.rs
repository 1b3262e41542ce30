//! Route partitioning and candidate search points.

use std::collections::BTreeMap;

use crate::models::GeoPoint;

/// A contiguous slice of the route associated with one potential stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    pub index: usize,
    pub points: &'a [GeoPoint],
}

impl<'a> Segment<'a> {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Candidate search points for this segment.
    pub fn search_points(&self) -> Vec<GeoPoint> {
        search_points(self.points)
    }
}

/// Split `points` into `n` contiguous segments of near-equal size.
///
/// Every segment gets `len / n` points and the first `len % n` segments get
/// one more, so sizes differ by at most one and later legs are never starved.
/// Returns an empty map when `n == 0` or `points` is empty. When `n > len`
/// the trailing segments are empty.
pub fn partition(points: &[GeoPoint], n: usize) -> BTreeMap<usize, Segment<'_>> {
    let mut segments = BTreeMap::new();
    if n == 0 || points.is_empty() {
        return segments;
    }

    let base = points.len() / n;
    let remainder = points.len() % n;
    let mut start = 0;
    for index in 0..n {
        let size = base + usize::from(index < remainder);
        let end = start + size;
        segments.insert(
            index,
            Segment {
                index,
                points: &points[start..end],
            },
        );
        start = end;
    }
    segments
}

/// Quartile points of a segment: indices `len/4`, `2*len/4`, `3*len/4`.
///
/// Probing the interior of a leg rather than its ends favors stations that
/// are useful for that leg. Duplicated indices on very short segments are
/// kept; the assembler's dedup handles repeated stations.
pub fn search_points(segment: &[GeoPoint]) -> Vec<GeoPoint> {
    let len = segment.len();
    (1..=3)
        .map(|quarter| quarter * len / 4)
        .filter_map(|idx| segment.get(idx).copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(len: usize) -> Vec<GeoPoint> {
        (0..len)
            .map(|i| GeoPoint::new(i as f64 * 0.1, 45.0 + i as f64 * 0.01))
            .collect()
    }

    fn sizes(segments: &BTreeMap<usize, Segment<'_>>) -> Vec<usize> {
        segments.values().map(Segment::len).collect()
    }

    #[test]
    fn ten_points_into_three_segments() {
        let points = line(10);
        let segments = partition(&points, 3);
        assert_eq!(sizes(&segments), vec![4, 3, 3]);
    }

    #[test]
    fn zero_segments_or_empty_route_yield_nothing() {
        assert!(partition(&line(10), 0).is_empty());
        assert!(partition(&[], 4).is_empty());
    }

    #[test]
    fn more_segments_than_points_leaves_trailing_segments_empty() {
        let points = line(2);
        let segments = partition(&points, 4);
        assert_eq!(segments.len(), 4);
        assert_eq!(sizes(&segments), vec![1, 1, 0, 0]);
    }

    #[test]
    fn concatenation_reconstructs_route_and_sizes_are_balanced() {
        for len in 1..40 {
            let points = line(len);
            for n in 1..12 {
                let segments = partition(&points, n);
                assert_eq!(segments.len(), n);

                let rebuilt: Vec<GeoPoint> = segments
                    .values()
                    .flat_map(|segment| segment.points.iter().copied())
                    .collect();
                assert_eq!(rebuilt, points, "len {len}, n {n}");

                let sizes = sizes(&segments);
                let max = sizes.iter().copied().max().unwrap_or(0);
                let min = sizes.iter().copied().min().unwrap_or(0);
                assert!(max - min <= 1, "len {len}, n {n}: {sizes:?}");
                assert_eq!(sizes.iter().sum::<usize>(), len);
            }
        }
    }

    #[test]
    fn segment_indexes_match_keys() {
        let points = line(9);
        for (key, segment) in partition(&points, 4) {
            assert_eq!(key, segment.index);
        }
    }

    #[test]
    fn search_points_are_quartiles() {
        let points = line(8);
        assert_eq!(search_points(&points), vec![points[2], points[4], points[6]]);

        let points = line(10);
        assert_eq!(search_points(&points), vec![points[2], points[5], points[7]]);
    }

    #[test]
    fn short_segments_keep_in_bounds_indices() {
        assert!(search_points(&[]).is_empty());

        let one = line(1);
        assert_eq!(search_points(&one), vec![one[0], one[0], one[0]]);

        let three = line(3);
        assert_eq!(search_points(&three), vec![three[0], three[1], three[2]]);
    }
}
