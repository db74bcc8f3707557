use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::i18n::Language;
use crate::ledger::format::format_amount;
use crate::ledger::player::{AmountUnit, Operation, Player};

/// One kind of session mutation, with the values the user entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "actionType",
    content = "details",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum GameAction {
    GameStart {
        initial_amount: u32,
        unit: AmountUnit,
    },
    GameRestart {
        initial_amount: u32,
        unit: AmountUnit,
    },
    Transfer {
        from_player: String,
        to_player: String,
        amount: f64,
        unit: AmountUnit,
    },
    BalanceAdjust {
        player_name: String,
        operation: Operation,
        amount: f64,
        unit: AmountUnit,
        new_balance: i64,
    },
    AddPlayer {
        player_name: String,
        amount: f64,
        unit: AmountUnit,
        balance: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub name: String,
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub action: GameAction,
    /// Balances right after the mutation, in player order.
    pub player_balances: Vec<BalanceSnapshot>,
}

/// A log entry rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogLine {
    pub time: String,
    pub action: String,
    pub balances: Vec<FormattedBalance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedBalance {
    pub name: String,
    pub balance: String,
}

impl LogEntry {
    pub fn new(action: GameAction, players: &[Player]) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            player_balances: players
                .iter()
                .map(|p| BalanceSnapshot {
                    name: p.name.clone(),
                    balance: p.balance,
                })
                .collect(),
        }
    }

    pub fn describe(&self, language: Language) -> LogLine {
        LogLine {
            time: self
                .timestamp
                .with_timezone(&Local)
                .format("%H:%M")
                .to_string(),
            action: language.describe_action(&self.action),
            balances: self
                .player_balances
                .iter()
                .map(|b| FormattedBalance {
                    name: b.name.clone(),
                    balance: format_amount(b.balance),
                })
                .collect(),
        }
    }
}
