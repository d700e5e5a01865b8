// Math utilities shared by the mixer and character motion

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Normalized progress of `elapsed` through a span of `duration` seconds, clamped to [0, 1]
///
/// A non-positive duration counts as already complete.
pub fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}

/// Wrap a playback time into [0, duration)
pub fn wrap_time(time: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 0.0;
    }
    let wrapped = time % duration;
    if wrapped < 0.0 {
        wrapped + duration
    } else {
        wrapped
    }
}
