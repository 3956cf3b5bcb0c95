// ── Persisted display settings ──
//
// Mirrored into the reactive store and written back through the
// `SettingsStore` seam whenever a controller changes them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::amount::Unit;

pub const DEFAULT_FIAT: &str = "usd";

/// The persisted settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show amounts in fiat instead of a bitcoin denomination.
    pub display_fiat: bool,
    pub unit: Unit,
    /// Fiat currency code the exchange-rate poller tracks.
    pub fiat: String,
    /// Currency code -> value of 1 unit of that currency in BTC.
    pub exchange_rate: BTreeMap<String, f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_fiat: false,
            unit: Unit::Btc,
            fiat: DEFAULT_FIAT.to_owned(),
            exchange_rate: BTreeMap::new(),
        }
    }
}
