//! Unit conversion utilities.
//!
//! DrawingML stores lengths in EMUs, angles in 60000ths of a degree,
//! color modifier percentages in 1/1000 percent and font sizes in 1/100
//! point. Everything the resolvers hand back is expressed in points,
//! pixels, degrees or plain fractions.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PT: i64 = 12_700;
pub const ANGLE_UNITS_PER_DEGREE: f64 = 60_000.0;
pub const PERCENT_UNITS_PER_FRACTION: f64 = 100_000.0;
pub const DEFAULT_DPI: u32 = 96;

#[inline]
pub fn emu_to_pt_f64(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_PT as f64
}

#[inline]
pub fn emu_to_px_f64(emu: i64, dpi: u32) -> f64 {
    emu as f64 * dpi as f64 / EMUS_PER_INCH as f64
}

#[inline]
pub fn emu_to_px_96(emu: i64) -> f64 {
    emu_to_px_f64(emu, DEFAULT_DPI)
}

/// Convert a raw `ang` attribute to whole degrees, `round(raw / 60000)`.
#[inline]
pub fn angle_to_degrees(raw: i64) -> f64 {
    (raw as f64 / ANGLE_UNITS_PER_DEGREE).round()
}

/// Convert a raw angle without rounding, used for hue values.
#[inline]
pub fn angle_to_degrees_exact(raw: f64) -> f64 {
    raw / ANGLE_UNITS_PER_DEGREE
}

/// Convert a 1/1000-percent value to a fraction (`50000` -> `0.5`).
#[inline]
pub fn percentage_to_fraction(raw: f64) -> f64 {
    raw / PERCENT_UNITS_PER_FRACTION
}

/// Text run size (`sz`) is stored in hundredths of a point.
#[inline]
pub fn centipoints_to_pt(raw: i64) -> f64 {
    raw as f64 / 100.0
}

/// `spcPct` values are stored in 1/1000 percent (`100000` -> `100.0`).
#[inline]
pub fn spacing_percent(raw: i64) -> f64 {
    raw as f64 / 1000.0
}
