//! Heading band and field quadrant classification

use crate::types::{Pose, Quadrant};

/// Classify a normalized heading into the 90° band around its nearest axis
///
/// Bands are closed at the top: 45° belongs to [`Quadrant::PosPos`], 135° to
/// [`Quadrant::NegPos`] and so on. Both 0° and 360° are [`Quadrant::PosPos`].
///
/// | Heading | Band |
/// |---|---|
/// | `[0, 45]` or `(315, 360]` | `PosPos` |
/// | `(45, 135]` | `NegPos` |
/// | `(135, 225]` | `NegNeg` |
/// | `(225, 315]` | `PosNeg` |
///
/// Headings outside `[0, 360]` (or NaN) are not expected and fall back to
/// [`Quadrant::NegNeg`]; normalize with
/// [`normalize_heading`](crate::normalize_heading) first.
///
/// # Example
/// ```
/// use wall_reset::{Quadrant, heading_octant};
///
/// assert_eq!(heading_octant(0.0), Quadrant::PosPos);
/// assert_eq!(heading_octant(45.0), Quadrant::PosPos);
/// assert_eq!(heading_octant(45.5), Quadrant::NegPos);
/// assert_eq!(heading_octant(300.0), Quadrant::PosNeg);
/// ```
pub fn heading_octant(heading: f32) -> Quadrant {
    if (0.0..=45.0).contains(&heading) || (heading > 315.0 && heading <= 360.0) {
        return Quadrant::PosPos;
    }

    if heading > 45.0 && heading <= 135.0 {
        return Quadrant::NegPos;
    }

    if heading > 135.0 && heading <= 225.0 {
        return Quadrant::NegNeg;
    }

    if heading > 225.0 && heading <= 315.0 {
        return Quadrant::PosNeg;
    }

    Quadrant::NegNeg
}

/// Classify a field position by the signs of its coordinates
///
/// | x | y | Quadrant |
/// |---|---|---|
/// | `> 0` | `> 0` | `PosPos` |
/// | `> 0` | `< 0` | `NegPos` |
/// | `< 0` | `< 0` | `NegNeg` |
/// | `< 0` | `> 0` | `PosNeg` |
///
/// A position lying on either axis classifies as [`Quadrant::PosPos`]. The
/// heading component of the pose is ignored.
///
/// # Example
/// ```
/// use wall_reset::{Pose, Quadrant, position_quadrant};
///
/// assert_eq!(position_quadrant(&Pose::new(12.0, 30.0, 0.0)), Quadrant::PosPos);
/// assert_eq!(position_quadrant(&Pose::new(-12.0, -30.0, 90.0)), Quadrant::NegNeg);
/// ```
pub fn position_quadrant(pose: &Pose) -> Quadrant {
    let (x, y) = (pose.x, pose.y);

    if x > 0.0 && y > 0.0 {
        return Quadrant::PosPos;
    }

    if x > 0.0 && y < 0.0 {
        return Quadrant::NegPos;
    }

    if x < 0.0 && y < 0.0 {
        return Quadrant::NegNeg;
    }

    if x < 0.0 && y > 0.0 {
        return Quadrant::PosNeg;
    }

    Quadrant::PosPos
}
