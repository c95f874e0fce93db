/// Upper bound of points enriched per analyzed route.
pub const MAX_SAMPLED_POINTS: usize = 5;

/// Picks at most `max_samples` points at an even stride of `len / samples`,
/// starting with the first point and keeping the source order.
pub fn sample_evenly<T: Copy>(points: &[T], max_samples: usize) -> Vec<T> {
    let samples = max_samples.min(points.len());
    if samples == 0 {
        return Vec::new();
    }

    let stride = points.len() / samples;

    points.iter().step_by(stride).take(samples).copied().collect()
}
