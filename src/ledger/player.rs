use serde::{Deserialize, Serialize};

use crate::ledger::error::ValidationError;

pub type PlayerId = u64;

/// Player ids stay below 2^53 so browser clients can hold them as numbers.
pub(crate) const MAX_PLAYER_ID: PlayerId = 1 << 53;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub balance: i64,
}

/// Scale of a user-entered magnitude. Stored as "K" / "M" like the browser
/// client writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AmountUnit {
    #[serde(rename = "K", alias = "thousand")]
    Thousand,
    #[default]
    #[serde(rename = "M", alias = "million")]
    Million,
}

impl AmountUnit {
    pub fn multiplier(self) -> i64 {
        match self {
            AmountUnit::Thousand => 1_000,
            AmountUnit::Million => 1_000_000,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AmountUnit::Thousand => "K",
            AmountUnit::Million => "M",
        }
    }

    /// Converts an entered magnitude into whole currency units.
    ///
    /// Fractional magnitudes are allowed (1.5 M), the result is rounded to the
    /// nearest unit. Anything that does not end up as at least one unit is
    /// rejected.
    pub fn to_units(self, amount: f64) -> Result<i64, ValidationError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::InvalidAmount);
        }

        let units = (amount * self.multiplier() as f64).round();
        if units < 1.0 || units >= i64::MAX as f64 {
            return Err(ValidationError::InvalidAmount);
        }

        Ok(units as i64)
    }

    /// Converts a starting balance entered for a new player. Unlike
    /// [`AmountUnit::to_units`] zero and negative balances are accepted; only
    /// non-finite or out-of-range input is rejected.
    pub fn to_balance(self, amount: f64) -> Result<i64, ValidationError> {
        let units = (amount * self.multiplier() as f64).round();
        if !units.is_finite() || units.abs() >= i64::MAX as f64 {
            return Err(ValidationError::InvalidAmount);
        }

        Ok(units as i64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Subtract,
}

/// Stable descending sort by balance. Ties keep insertion order.
pub fn rank(players: &[Player]) -> Vec<&Player> {
    let mut ranked: Vec<&Player> = players.iter().collect();
    ranked.sort_by(|a, b| b.balance.cmp(&a.balance));
    ranked
}
