// ── Amount parsing ──
//
// User-entered amounts are strings in the display unit (or fiat, when
// fiat display is on). Everything on the wire is satoshis.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CoreError;
use crate::model::settings::Settings;

pub const SATOSHIS_PER_BTC: f64 = 100_000_000.0;

/// Bitcoin display denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Btc,
    Bit,
    Sat,
}

impl Unit {
    /// Satoshis in one unit of this denomination.
    pub fn satoshis_per_unit(self) -> f64 {
        match self {
            Self::Btc => SATOSHIS_PER_BTC,
            Self::Bit => 100.0,
            Self::Sat => 1.0,
        }
    }
}

/// Parse a user-entered amount string into satoshis under the current
/// display settings.
///
/// With fiat display on, the amount is divided through the stored
/// exchange rate for the configured fiat currency; a missing rate is a
/// validation failure (no stale-rate guessing).
pub fn to_satoshis(amount: &str, settings: &Settings) -> Result<i64, CoreError> {
    let invalid = || CoreError::InvalidAmount {
        value: amount.to_owned(),
    };

    let value: f64 = amount.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }

    let satoshis = if settings.display_fiat {
        let rate = settings
            .exchange_rate
            .get(&settings.fiat)
            .copied()
            .ok_or_else(|| {
                CoreError::validation(format!("no exchange rate for {}", settings.fiat))
            })?;
        value * rate * SATOSHIS_PER_BTC
    } else {
        value * settings.unit.satoshis_per_unit()
    };

    #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
    Ok(satoshis.round() as i64)
}

/// Convert satoshis into the current display denomination (or fiat).
/// Display math only; a missing fiat rate falls back to the unit value.
#[allow(clippy::as_conversions, clippy::cast_precision_loss)]
pub fn from_satoshis(satoshis: i64, settings: &Settings) -> f64 {
    let unit_value = satoshis as f64 / settings.unit.satoshis_per_unit();
    if settings.display_fiat {
        if let Some(rate) = settings.exchange_rate.get(&settings.fiat) {
            return satoshis as f64 / SATOSHIS_PER_BTC / rate;
        }
    }
    unit_value
}
