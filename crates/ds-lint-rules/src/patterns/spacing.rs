//! Spacing-grid validator.
//!
//! Spacing lengths must sit on a 4px grid between 0 and 32px (2rem). One
//! pixel is accepted as a hairline but noted, since in a spacing property
//! it is more often a mistake than a border. Relative and computed values
//! (`var()`, `calc()`, percentages, keywords) cannot be judged and pass.

use super::split_top_level;
use std::fmt;
use std::ops::Range;

/// Grid step in pixels.
pub const GRID_PX: u32 = 4;

/// Largest spacing value in pixels.
pub const CEILING_PX: u32 = 32;

/// Pixels per rem.
pub const REM_PX: f64 = 16.0;

/// Unit a spacing length was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// `8px`.
    Px,
    /// `0.5rem`.
    Rem,
    /// `8`, read as pixels.
    Unitless,
}

/// A grid value rendered in the unit of the value it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridValue {
    /// Pixels, sign included.
    pub px: i64,
    /// Unit to render in.
    pub unit: Unit,
}

impl fmt::Display for GridValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Px => write!(f, "{}px", self.px),
            Unit::Unitless => write!(f, "{}", self.px),
            Unit::Rem => {
                #[allow(clippy::cast_precision_loss)]
                let rem = self.px as f64 / REM_PX;
                let text = format!("{rem:.4}");
                let text = text.trim_end_matches('0').trim_end_matches('.');
                write!(f, "{text}rem")
            }
        }
    }
}

/// Verdict on one spacing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingCheck {
    /// On the grid, or not a length the grid applies to.
    Valid,
    /// `1px`: valid, but worth a note.
    Hairline,
    /// A length off the grid.
    OffGrid {
        /// The nearest grid value, in the same unit.
        nearest: GridValue,
    },
    /// A length in a unit the grid does not cover (`em`, `vh`).
    Unsupported,
}

impl SpacingCheck {
    /// Returns true for [`SpacingCheck::Valid`] and [`SpacingCheck::Hairline`].
    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid | Self::Hairline)
    }

    /// Returns the suggested grid value of an off-grid length.
    #[must_use]
    pub fn nearest(self) -> Option<GridValue> {
        match self {
            Self::OffGrid { nearest } => Some(nearest),
            _ => None,
        }
    }
}

/// Snaps a pixel magnitude to the grid. Ties round down, anything above
/// the ceiling snaps to it, and a nonzero value never snaps to 0.
#[must_use]
pub fn nearest_grid_px(px: f64) -> u32 {
    let px = px.abs();
    let ceiling = f64::from(CEILING_PX);
    if px >= ceiling {
        return CEILING_PX;
    }
    let step = f64::from(GRID_PX);
    if px > 0.0 && px < step {
        return GRID_PX;
    }
    let below = (px / step).floor() * step;
    let snapped = if px - below > step / 2.0 { below + step } else { below };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let snapped = snapped as u32;
    snapped.min(CEILING_PX)
}

/// Returns true if a pixel value lies on the grid.
#[must_use]
pub fn on_grid_px(px: u32) -> bool {
    px <= CEILING_PX && px % GRID_PX == 0
}

/// Checks a single spacing value.
#[must_use]
pub fn check_spacing(value: &str) -> SpacingCheck {
    let value = value.trim();
    let lower = value.to_ascii_lowercase();

    if lower.is_empty()
        || lower.starts_with("var(")
        || lower.starts_with("calc(")
        || lower.starts_with("min(")
        || lower.starts_with("max(")
        || lower.starts_with("clamp(")
        || lower.ends_with('%')
        || lower.bytes().all(|b| b.is_ascii_alphabetic() || b == b'-')
    {
        return SpacingCheck::Valid;
    }

    let number_end = lower
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(lower.len());
    let (number, unit) = lower.split_at(number_end);
    let Ok(number) = number.parse::<f64>() else {
        return SpacingCheck::Unsupported;
    };
    let unit = match unit {
        "px" => Unit::Px,
        "rem" => Unit::Rem,
        "" => Unit::Unitless,
        _ => return SpacingCheck::Unsupported,
    };
    let px = if unit == Unit::Rem { number * REM_PX } else { number };
    let magnitude = px.abs();

    if magnitude == 1.0 && unit != Unit::Rem {
        return SpacingCheck::Hairline;
    }
    if magnitude.fract() == 0.0 && magnitude <= f64::from(CEILING_PX) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        if on_grid_px(magnitude as u32) {
            return SpacingCheck::Valid;
        }
    }

    let sign = if px < 0.0 { -1 } else { 1 };
    SpacingCheck::OffGrid {
        nearest: GridValue {
            px: sign * i64::from(nearest_grid_px(magnitude)),
            unit,
        },
    }
}

/// One part of a shorthand value with its verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShorthandPart<'a> {
    /// The part as written.
    pub text: &'a str,
    /// Range relative to the shorthand value.
    pub range: Range<usize>,
    /// Verdict.
    pub check: SpacingCheck,
}

/// Checks every part of a shorthand such as `8px 10px`.
#[must_use]
pub fn check_shorthand(value: &str) -> Vec<ShorthandPart<'_>> {
    split_top_level(value)
        .into_iter()
        .map(|(start, text)| ShorthandPart {
            text,
            range: start..start + text.len(),
            check: check_spacing(text),
        })
        .collect()
}

/// Returns true if every part of the shorthand is valid.
#[must_use]
pub fn shorthand_is_valid(value: &str) -> bool {
    check_shorthand(value).iter().all(|p| p.check.is_valid())
}

/// Returns true if a CSS or script property name sets spacing.
#[must_use]
pub fn is_spacing_property(name: &str) -> bool {
    let normalized: String = name
        .chars()
        .filter(|c| *c != '-')
        .collect::<String>()
        .to_ascii_lowercase();
    normalized.starts_with("padding") || normalized.starts_with("margin") || normalized.ends_with("gap")
}
