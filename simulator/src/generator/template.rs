use repcore::prelude::AngleRange;
use std::f32::consts::PI;

/// Elbow-angle waveform for `reps` full curls.
///
/// Each rep eases from the low edge of `range` up to the high edge and back,
/// `frames_per_half` samples per half, and the wave closes on a final low
/// sample. Both edges are overshot by `overshoot` degrees so the extreme
/// samples clamp onto exact boundary percentages.
pub fn curl_wave(reps: usize, frames_per_half: usize, range: AngleRange, overshoot: f32) -> Vec<f32> {
    let frames = frames_per_half.max(1);
    let low = range.low - overshoot;
    let span = (range.high + overshoot) - low;
    let eased = |t: f32| low + span * (1.0 - (PI * t).cos()) / 2.0;

    let mut wave = Vec::with_capacity(reps * frames * 2 + 1);
    for _ in 0..reps {
        for i in 0..frames {
            wave.push(eased(i as f32 / frames as f32));
        }
        for i in 0..frames {
            wave.push(eased(1.0 - i as f32 / frames as f32));
        }
    }
    wave.push(low);
    wave
}
