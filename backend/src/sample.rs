use chrono::{Duration, NaiveDateTime};
use shared::Coordinate;

/// One sampled route point: an index into the route geometry and the
/// estimated time the traveler reaches it.
#[derive(Debug, Clone, Copy)]
pub struct SamplePoint {
    pub index: usize,
    pub arrival: NaiveDateTime,
}

/// Subsample a route geometry by even striding and estimate the arrival
/// time at each sampled point.
///
/// Arrival estimates interpolate linearly by point index, assuming uniform
/// speed across the route. Locally inaccurate, but sufficient for coarse
/// hazard sampling.
pub fn sample_route(
    geometry: &[Coordinate],
    total_duration_secs: f64,
    departure: NaiveDateTime,
    sample_count: usize,
) -> Vec<SamplePoint> {
    if geometry.is_empty() {
        return Vec::new();
    }

    let stride = (geometry.len() / sample_count.max(1)).max(1);

    (0..geometry.len())
        .step_by(stride)
        .map(|index| {
            let progress = index as f64 / geometry.len() as f64;
            let offset_ms = (progress * total_duration_secs * 1000.0).round() as i64;
            SamplePoint {
                index,
                arrival: departure + Duration::milliseconds(offset_ms),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn departure() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn line(points: usize) -> Vec<Coordinate> {
        (0..points)
            .map(|i| Coordinate {
                lat: 40.0 + i as f64 * 0.01,
                lon: -105.0,
            })
            .collect()
    }

    #[test]
    fn empty_geometry_yields_no_samples() {
        assert!(sample_route(&[], 3600.0, departure(), 30).is_empty());
    }

    #[test]
    fn short_geometry_keeps_every_point() {
        let samples = sample_route(&line(5), 3600.0, departure(), 30);
        let indices: Vec<_> = samples.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn long_geometry_strides_evenly() {
        let samples = sample_route(&line(90), 3600.0, departure(), 30);
        let indices: Vec<_> = samples.iter().map(|s| s.index).collect();
        assert_eq!(indices.len(), 30);
        assert_eq!(indices[0], 0);
        assert_eq!(indices[1], 3);
        assert_eq!(*indices.last().unwrap(), 87);
    }

    #[test]
    fn first_sample_departs_on_time() {
        let samples = sample_route(&line(10), 3600.0, departure(), 5);
        assert_eq!(samples[0].arrival, departure());
    }

    #[test]
    fn arrival_interpolates_by_index() {
        // 10 points, 1000 s total: index 5 is at half the route
        let samples = sample_route(&line(10), 1000.0, departure(), 5);
        let halfway = samples.iter().find(|s| s.index == 4).unwrap();
        assert_eq!(halfway.arrival, departure() + Duration::seconds(400));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_indices_start_at_zero_and_increase(
                points in 1usize..500,
                duration in 0.0..200_000.0f64,
                count in 1usize..60,
            ) {
                let samples = sample_route(&line(points), duration, departure(), count);
                prop_assert_eq!(samples[0].index, 0);
                for pair in samples.windows(2) {
                    prop_assert!(pair[0].index < pair[1].index);
                    prop_assert!(pair[0].arrival <= pair[1].arrival);
                }
                prop_assert!(samples.last().unwrap().index < points);
            }
        }
    }
}
