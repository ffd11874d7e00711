//! Display subunits
//!
//! Amounts are stored in litoshis (1 LTC = 10^8 litoshis) and shown to the
//! user in one of three subunits selected in the wallet settings. The
//! setting is a small integer; unrecognized values mean whole litecoin.
//!
//! Conversions are plain `f64` arithmetic. Nothing is rounded here, so
//! `NaN` and infinities pass straight through; formatting for display is
//! the caller's job.

use crate::constants::LITOSHIS_PER_LTC;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User-selected display denomination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub enum Subunit {
    /// Whole coins, Ł
    #[default]
    Litecoin,
    /// 1/1000 LTC, ł
    Lites,
    /// 1/1000000 LTC, mł
    Photons,
}

impl Subunit {
    /// Litoshis in one unit of this subunit
    pub const fn sats_per_unit(self) -> f64 {
        match self {
            Subunit::Litecoin => LITOSHIS_PER_LTC,
            Subunit::Lites => 100_000.0,
            Subunit::Photons => 100.0,
        }
    }

    /// Units of this subunit in one whole litecoin
    pub const fn units_per_litecoin(self) -> f64 {
        match self {
            Subunit::Litecoin => 1.0,
            Subunit::Lites => 1_000.0,
            Subunit::Photons => 1_000_000.0,
        }
    }

    /// Currency symbol shown next to amounts
    pub fn symbol(self) -> &'static str {
        match self {
            Subunit::Litecoin => "Ł",
            Subunit::Lites => "ł",
            Subunit::Photons => "mł",
        }
    }

    /// Short code shown in unit pickers
    pub fn code(self) -> &'static str {
        match self {
            Subunit::Litecoin => "LTC",
            Subunit::Lites => "lites",
            Subunit::Photons => "photons",
        }
    }
}

impl From<i64> for Subunit {
    fn from(setting: i64) -> Self {
        match setting {
            1 => Subunit::Lites,
            2 => Subunit::Photons,
            // 0 and anything unrecognized
            _ => Subunit::Litecoin,
        }
    }
}

impl From<Subunit> for u8 {
    fn from(subunit: Subunit) -> Self {
        match subunit {
            Subunit::Litecoin => 0,
            Subunit::Lites => 1,
            Subunit::Photons => 2,
        }
    }
}

impl fmt::Display for Subunit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Convert an amount in `subunit` to litoshis
pub fn subunit_to_sats(amount: f64, subunit: Subunit) -> f64 {
    amount * subunit.sats_per_unit()
}

/// Convert litoshis to an amount in `subunit`
pub fn sats_to_subunit(amount: f64, subunit: Subunit) -> f64 {
    amount / subunit.sats_per_unit()
}

/// Convert whole litecoin (as carried in BIP21 URIs) to `subunit`
pub fn litecoin_to_subunit(amount: f64, subunit: Subunit) -> f64 {
    amount * subunit.units_per_litecoin()
}
