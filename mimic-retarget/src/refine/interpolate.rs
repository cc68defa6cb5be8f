//! Gap filling for a single scalar channel.

/// Fill missing samples of `channel` in place.
///
/// `times` holds the frame index of every sample and must be strictly
/// increasing. Runs between two known samples are linearly interpolated over
/// those indices, leading gaps hold the first known sample and trailing gaps
/// hold the last one. A channel with no known sample is left untouched.
pub fn fill_gaps(channel: &mut [Option<f32>], times: &[u32]) {
    debug_assert_eq!(channel.len(), times.len());
    let mut last_known: Option<(usize, f32)> = None;

    for i in 0..channel.len() {
        let Some(value) = channel[i] else {
            continue;
        };
        match last_known {
            Some((k, v0)) => {
                let t0 = times[k] as f32;
                let span = times[i] as f32 - t0;
                for (slot, &t) in channel[k + 1..i].iter_mut().zip(&times[k + 1..i]) {
                    *slot = Some(v0 + (value - v0) * (t as f32 - t0) / span);
                }
            }
            None => channel[..i].fill(Some(value)),
        }
        last_known = Some((i, value));
    }

    if let Some((k, v1)) = last_known {
        channel[k + 1..].fill(Some(v1));
    }
}
