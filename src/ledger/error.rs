use thiserror::Error;

use crate::ledger::confirm::ConfirmPrompt;
use crate::ledger::player::PlayerId;

/// Bad user input. The operation is aborted and nothing changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("player name is required")]
    EmptyName,
    #[error("player name {0:?} already exists")]
    DuplicateName(String),
    #[error("at most {} players are supported", crate::ledger::MAX_PLAYERS)]
    TooManyPlayers,
    #[error("at least {} players are required to start a game", crate::ledger::MIN_PLAYERS)]
    NotEnoughPlayers,
    #[error("amount must be a positive number")]
    InvalidAmount,
    #[error("{0} has insufficient balance")]
    InsufficientBalance(String),
    #[error("player {0} not found")]
    UnknownPlayer(PlayerId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0:?} was not confirmed")]
    NotConfirmed(ConfirmPrompt),
}
