use serde::{Deserialize, Serialize};

use crate::ledger::{ConfirmPrompt, GameAction, Operation, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    #[default]
    En,
}

impl Language {
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        if code.starts_with("zh") {
            Some(Language::Zh)
        } else if code.starts_with("en") {
            Some(Language::En)
        } else {
            None
        }
    }

    pub fn validation_message(self, err: &ValidationError) -> String {
        match (self, err) {
            (Language::Zh, ValidationError::EmptyName) => "请输入玩家名称".to_string(),
            (Language::En, ValidationError::EmptyName) => "Please enter player name".to_string(),
            (Language::Zh, ValidationError::DuplicateName(_)) => "玩家名称已存在".to_string(),
            (Language::En, ValidationError::DuplicateName(_)) => {
                "Player name already exists".to_string()
            }
            (Language::Zh, ValidationError::TooManyPlayers) => "最多支持6个玩家".to_string(),
            (Language::En, ValidationError::TooManyPlayers) => {
                "Maximum 6 players supported".to_string()
            }
            (Language::Zh, ValidationError::NotEnoughPlayers) => {
                "至少需要2个玩家才能开始游戏".to_string()
            }
            (Language::En, ValidationError::NotEnoughPlayers) => {
                "At least 2 players required to start game".to_string()
            }
            (Language::Zh, ValidationError::InvalidAmount) => "请输入有效的金额".to_string(),
            (Language::En, ValidationError::InvalidAmount) => {
                "Please enter valid amount".to_string()
            }
            (Language::Zh, ValidationError::InsufficientBalance(name)) => {
                format!("{} 余额不足", name)
            }
            (Language::En, ValidationError::InsufficientBalance(name)) => {
                format!("{} insufficient balance", name)
            }
            (Language::Zh, ValidationError::UnknownPlayer(id)) => format!("未找到玩家 {}", id),
            (Language::En, ValidationError::UnknownPlayer(id)) => {
                format!("Player {} not found", id)
            }
        }
    }

    pub fn confirm_prompt(self, prompt: ConfirmPrompt) -> &'static str {
        match (self, prompt) {
            (Language::Zh, ConfirmPrompt::RestartGame) => {
                "确定要重新开始游戏吗？所有余额将被重置。"
            }
            (Language::En, ConfirmPrompt::RestartGame) => {
                "Restart the game? All balances will be reset."
            }
            (Language::Zh, ConfirmPrompt::ClearHistory) => "确定要清除当前游戏的操作记录吗？",
            (Language::En, ConfirmPrompt::ClearHistory) => "Clear current game records?",
            (Language::Zh, ConfirmPrompt::ClearAllData) => {
                "确定要清除所有数据吗？这将删除所有玩家信息、游戏历史、操作日志和设置。此操作不可恢复！"
            }
            (Language::En, ConfirmPrompt::ClearAllData) => {
                "Clear all data? This will delete all player info, game history, operation logs and settings. This action cannot be undone!"
            }
        }
    }

    fn operation_label(self, operation: Operation) -> &'static str {
        match (self, operation) {
            (Language::Zh, Operation::Add) => "增加",
            (Language::Zh, Operation::Subtract) => "减少",
            (Language::En, Operation::Add) => "added",
            (Language::En, Operation::Subtract) => "subtracted",
        }
    }

    pub fn describe_action(self, action: &GameAction) -> String {
        match action {
            GameAction::GameStart {
                initial_amount,
                unit,
            } => match self {
                Language::Zh => format!("游戏开始，初始金额 {}{}", initial_amount, unit.symbol()),
                Language::En => format!(
                    "Game started, initial amount {}{}",
                    initial_amount,
                    unit.symbol()
                ),
            },
            GameAction::GameRestart {
                initial_amount,
                unit,
            } => match self {
                Language::Zh => format!(
                    "重新开始游戏，所有余额重置为 {}{}",
                    initial_amount,
                    unit.symbol()
                ),
                Language::En => format!(
                    "Game restarted, all balances reset to {}{}",
                    initial_amount,
                    unit.symbol()
                ),
            },
            GameAction::Transfer {
                from_player,
                to_player,
                amount,
                unit,
            } => match self {
                Language::Zh => format!(
                    "{} 转账 {}{} 给 {}",
                    from_player,
                    amount,
                    unit.symbol(),
                    to_player
                ),
                Language::En => format!(
                    "{} transferred {}{} to {}",
                    from_player,
                    amount,
                    unit.symbol(),
                    to_player
                ),
            },
            GameAction::BalanceAdjust {
                player_name,
                operation,
                amount,
                unit,
                ..
            } => format!(
                "{} {} {}{}",
                player_name,
                self.operation_label(*operation),
                amount,
                unit.symbol()
            ),
            GameAction::AddPlayer {
                player_name,
                amount,
                unit,
                ..
            } => match self {
                Language::Zh => format!(
                    "添加玩家 {}，初始余额 {}{}",
                    player_name,
                    amount,
                    unit.symbol()
                ),
                Language::En => format!(
                    "Added player {} with initial balance {}{}",
                    player_name,
                    amount,
                    unit.symbol()
                ),
            },
        }
    }
}
