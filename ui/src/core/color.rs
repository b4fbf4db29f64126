//! Goal-proximity color synthesis.
//!
//! Every tracked part has a saturated baseline color. As a value closes in on
//! its goal the rendered color blends toward white, reaching pure white when
//! the value sits exactly on the goal.

use std::fmt;

/// Share of the goal magnitude over which the blend toward white happens.
pub const TRANSITION_RATIO: f64 = 0.1;
/// Smallest transition width, so goals near zero still get a usable gradient.
pub const TRANSITION_FLOOR: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;

        Some(Self { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS functional notation, e.g. `rgb(255, 123, 0)`.
    pub fn css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// How far along the baseline→white blend a value sits: 1.0 on the goal,
/// falling linearly to 0.0 once the value is a full transition width away.
pub fn goal_progress(current: f64, goal: f64) -> f64 {
    let diff = (current - goal).abs();
    let range = (goal * TRANSITION_RATIO).max(TRANSITION_FLOOR);
    let progress = 1.0 - diff / range;

    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

/// Blend `baseline` toward white according to how close `current` is to `goal`.
pub fn color_for(baseline: Rgb, current: f64, goal: f64) -> Rgb {
    let progress = goal_progress(current, goal);

    Rgb {
        r: blend_channel(baseline.r, progress),
        g: blend_channel(baseline.g, progress),
        b: blend_channel(baseline.b, progress),
    }
}

fn blend_channel(channel: u8, progress: f64) -> u8 {
    let start = f64::from(channel);
    let blended = (start + (255.0 - start) * progress).round();
    blended.clamp(0.0, 255.0) as u8
}
