/// Clamped piecewise-linear interpolation over a two-point domain.
pub struct InterpHelper;

impl InterpHelper {
    /// Maps `value` from `domain` onto `range`.
    ///
    /// Values at or beyond either domain edge return that edge's output
    /// exactly, so callers can compare the result against the range bounds
    /// with `==`. `range` may be decreasing. `domain.0 < domain.1` is
    /// required; a degenerate domain returns `range.0`.
    pub fn linear(value: f32, domain: (f32, f32), range: (f32, f32)) -> f32 {
        let (x0, x1) = domain;
        let (y0, y1) = range;
        if value.is_nan() || !(x0 < x1) || value <= x0 {
            return y0;
        }
        if value >= x1 {
            return y1;
        }
        let t = (value - x0) / (x1 - x0);
        y0 + t * (y1 - y0)
    }
}
