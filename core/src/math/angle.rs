use crate::pose::Landmark;

pub struct AngleHelper;

impl AngleHelper {
    /// Angle at `vertex` swept from the `first` ray to the `last` ray, in
    /// degrees within `[0, 360)`.
    ///
    /// The sweep is signed in image coordinates (y grows downward), so the
    /// same bend reads as `a` on one arm and `360 - a` on the other.
    pub fn included_angle(first: Landmark, vertex: Landmark, last: Landmark) -> f32 {
        let to_last = (last.y - vertex.y).atan2(last.x - vertex.x);
        let to_first = (first.y - vertex.y).atan2(first.x - vertex.x);
        let mut degrees = (to_last - to_first).to_degrees();
        if degrees < 0.0 {
            degrees += 360.0;
        }
        if degrees >= 360.0 {
            degrees -= 360.0;
        }
        degrees
    }
}
