use std::collections::BTreeMap;

use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};

/// Base intensity bands of the five Karvonen zones as fractions of
/// heart-rate reserve, ordered from low to high intensity.
const BASE_INTENSITIES: [(f32, f32); 5] = [
    (0.50, 0.60),
    (0.60, 0.70),
    (0.70, 0.80),
    (0.80, 0.90),
    (0.90, 1.00),
];

const MODIFIER_MIN: f32 = 0.925;
const MODIFIER_MAX: f32 = 1.075;

/// A recovery score in the range 0 to 1, higher meaning better recovery.
///
/// Wearable vendors report readiness on a 0 to 100 scale, which saturates the
/// intensity modifier when fed into the zone calculation unconverted. Scores
/// must pass through [`Readiness::from_score`] instead.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Readiness(f32);

impl Readiness {
    pub fn new(value: f32) -> Result<Self, ReadinessError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ReadinessError::OutOfRange);
        }

        Ok(Self(value))
    }

    /// Convert a vendor-reported score in the range 0 to 100.
    pub fn from_score(score: f32) -> Result<Self, ReadinessError> {
        Self::new(score / 100.0)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ReadinessError {
    #[error("Readiness must be in the range 0.0 to 1.0")]
    OutOfRange,
}

/// Lower and upper bound of a heart-rate zone in beats per minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneBounds {
    pub low: u32,
    pub high: u32,
}

/// Calculate Karvonen heart-rate zones, adapting the intensity bands by
/// readiness and the acute:chronic load ratio.
///
/// Both endpoints of every band are scaled by the same modifier, so the
/// returned zones do not cross and increase monotonically with the zone
/// number. A non-positive heart-rate reserve collapses all zones to
/// `hr_rest`. The result maps zone numbers 1 (lowest intensity) to 5
/// (highest intensity) to their bounds.
#[must_use]
pub fn adaptive_zone_bounds(
    hr_rest: u32,
    hr_max: u32,
    readiness: Readiness,
    acr: f32,
) -> BTreeMap<u8, ZoneBounds> {
    #[allow(clippy::cast_precision_loss)]
    let hr_reserve = hr_max.saturating_sub(hr_rest) as f32;
    let modifier = intensity_modifier(readiness, acr);

    (1u8..)
        .zip(BASE_INTENSITIES)
        .map(|(zone, (low_pct, high_pct))| {
            (
                zone,
                ZoneBounds {
                    low: bpm(hr_rest, hr_reserve, (low_pct * modifier).min(1.0)),
                    high: bpm(hr_rest, hr_reserve, (high_pct * modifier).min(1.0)),
                },
            )
        })
        .collect()
}

/// Combined intensity modifier.
///
/// Readiness maps linearly to 0.8 to 1.2. An acute:chronic ratio above 1
/// reduces the modifier from 1.1 by 0.3 per unit, without a lower bound.
/// The product is clamped to [0.925, 1.075], which keeps the adapted zones
/// within a sensible distance of the base bands for any input.
fn intensity_modifier(readiness: Readiness, acr: f32) -> f32 {
    let readiness_mod = 0.4f32.mul_add(readiness.0, 0.8);
    let acr_mod = 1.1 - 0.3 * (acr - 1.0).max(0.0);

    (readiness_mod * acr_mod).clamp(MODIFIER_MIN, MODIFIER_MAX)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn bpm(hr_rest: u32, hr_reserve: f32, intensity: f32) -> u32 {
    hr_reserve.mul_add(intensity, hr_rest as f32).round() as u32
}
