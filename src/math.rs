//! Heading math and process-wide constants for wall resets

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Raw distance value reported by the sensor when no object is detected
pub const ERROR_READING: i32 = 9999;

/// Millimetre to inch conversion factor
pub const MM_TO_INCH: f32 = 0.0393701;

/// Distance from the field origin to each wall, in inches
pub const WALL_COORD: f32 = 70.208;

/// Upper bound of the raw confidence reported by the distance sensor
pub const CONFIDENCE_DOMAIN: f32 = 63.0;

/// Deviation returned for headings lying exactly on a multiple of 45°.
///
/// Such headings are treated as square to the wall; the value only needs to
/// produce a negligible trigonometric correction.
pub const SQUARE_TO_WALL_DEVIATION: f32 = 1.0;

/// Full turn in degrees
const FULL_TURN: f32 = 360.0;

/// Quarter turn in degrees
const QUARTER_TURN: f32 = 90.0;

/// Half of a quarter turn, the widest deviation from an axis
const EIGHTH_TURN: f32 = 45.0;

/// Normalize a heading into `[0, 360]`
///
/// Headings already inside the range are returned untouched, which keeps
/// the function idempotent (360° stays 360°). Anything else is wrapped by
/// Euclidean remainder.
///
/// Non-finite headings produce a non-finite result.
///
/// # Example
/// ```
/// use wall_reset::normalize_heading;
///
/// assert_eq!(normalize_heading(-90.0), 270.0);
/// assert_eq!(normalize_heading(450.0), 90.0);
/// assert_eq!(normalize_heading(360.0), 360.0);
/// ```
pub fn normalize_heading(heading: f32) -> f32 {
    if (0.0..=FULL_TURN).contains(&heading) {
        return heading;
    }

    heading.rem_euclid(FULL_TURN)
}

/// Signed deviation of a heading from its nearest axis, in degrees
///
/// Folds the heading by quarter turns until it lies within ±45°. Headings that
/// are an exact multiple of 45° short-circuit to [`SQUARE_TO_WALL_DEVIATION`].
///
/// # Example
/// ```
/// use wall_reset::axis_deviation;
///
/// assert_eq!(axis_deviation(100.0), 10.0);
/// assert_eq!(axis_deviation(350.0), -10.0);
/// ```
pub fn axis_deviation(heading: f32) -> f32 {
    if is_eighth_turn(heading) {
        return SQUARE_TO_WALL_DEVIATION;
    }

    let mut deviation = normalize_heading(heading);
    while deviation > EIGHTH_TURN {
        deviation -= QUARTER_TURN;
    }
    while deviation < -EIGHTH_TURN {
        deviation += QUARTER_TURN;
    }

    deviation
}

/// Closed-form equivalent of [`axis_deviation`]
///
/// Computes `((heading + 45) mod 90) - 45` with a non-negative remainder.
/// Agrees with the folding version for every heading that is not a multiple
/// of 45°.
pub fn axis_deviation_closed_form(heading: f32) -> f32 {
    if is_eighth_turn(heading) {
        return SQUARE_TO_WALL_DEVIATION;
    }

    (heading + EIGHTH_TURN).rem_euclid(QUARTER_TURN) - EIGHTH_TURN
}

fn is_eighth_turn(heading: f32) -> bool {
    heading % EIGHTH_TURN == 0.0
}
