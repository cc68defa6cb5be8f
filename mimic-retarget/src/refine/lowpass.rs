//! Zero-phase low-pass smoothing of a scalar channel.

use crate::config::LowpassConfig;
use std::f32::consts::PI;

/// alpha = 1 / (1 + tau/Te), tau = 1/(2*pi*fc)
fn smoothing_factor(te: f32, cutoff: f32) -> f32 {
    let r = 2.0 * PI * cutoff * te;
    r / (r + 1.0)
}

fn one_pole<'a>(samples: impl Iterator<Item = &'a mut f32>, alpha: f32) {
    let mut prev: Option<f32> = None;
    for sample in samples {
        let filtered = match prev {
            Some(p) => alpha * *sample + (1.0 - alpha) * p,
            None => *sample,
        };
        *sample = filtered;
        prev = Some(filtered);
    }
}

/// Smooth `channel` in place with a first-order low-pass run forward and
/// then backward, which cancels the phase lag of a single pass.
///
/// Non-positive cutoff or sample rate leaves the channel unchanged.
pub fn lowpass(channel: &mut [f32], config: &LowpassConfig) {
    if !(config.cutoff_hz > 0.0 && config.sample_rate_hz > 0.0) {
        return;
    }
    let alpha = smoothing_factor(1.0 / config.sample_rate_hz, config.cutoff_hz);
    one_pole(channel.iter_mut(), alpha);
    one_pole(channel.iter_mut().rev(), alpha);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_signal_is_unchanged() {
        let mut channel = vec![2.5; 20];
        lowpass(&mut channel, &LowpassConfig::default());
        assert!(channel.iter().all(|v| (v - 2.5).abs() < 1e-6));
    }

    #[test]
    fn test_high_frequency_is_attenuated() {
        // Nyquist-rate alternation at 30 Hz sampling
        let mut channel: Vec<f32> = (0..60).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        lowpass(&mut channel, &LowpassConfig::default());
        let peak = channel[10..50].iter().fold(0.0f32, |m, v| m.max(v.abs()));
        assert!(peak < 0.5, "peak {} not attenuated", peak);
    }

    #[test]
    fn test_slow_ramp_is_preserved_in_middle() {
        let mut channel: Vec<f32> = (0..90).map(|i| i as f32 * 0.01).collect();
        let original = channel.clone();
        lowpass(&mut channel, &LowpassConfig::default());
        for i in 30..60 {
            assert!((channel[i] - original[i]).abs() < 0.01);
        }
    }

    #[test]
    fn test_invalid_config_is_noop() {
        let mut channel = vec![1.0, -1.0, 1.0];
        lowpass(
            &mut channel,
            &LowpassConfig {
                cutoff_hz: 0.0,
                sample_rate_hz: 30.0,
            },
        );
        assert_eq!(channel, vec![1.0, -1.0, 1.0]);
    }
}
