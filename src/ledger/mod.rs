//! Player balances for one table and the lifecycle of the game played on it.
//!
//! `Ledger` is a plain state machine. Every mutating call validates first,
//! then mutates, then appends to the session log (only while a game is
//! running) and finally writes a snapshot through the injected
//! [`SnapshotStore`]. Store failures are logged and otherwise ignored.

pub mod action_log;
pub mod confirm;
pub mod error;
pub mod format;
pub mod player;

use log::{debug, info, warn};
use rand::Rng;

use crate::data_source::{Snapshot, SnapshotStore, DEFAULT_INITIAL_AMOUNT};
use crate::i18n::Language;

pub use action_log::{GameAction, LogEntry};
pub use confirm::{ConfirmPrompt, Confirmation};
pub use error::{LedgerError, ValidationError};
pub use format::format_amount;
pub use player::{rank, AmountUnit, Operation, Player, PlayerId};

pub const MAX_PLAYERS: usize = 6;
pub const MIN_PLAYERS: usize = 2;

#[derive(Debug, Default)]
struct Session {
    started: bool,
    game_id: Option<u64>,
    log: Vec<LogEntry>,
}

pub struct Ledger {
    players: Vec<Player>,
    initial_amount: u32,
    unit: AmountUnit,
    language: Language,
    session: Session,
    store: Box<dyn SnapshotStore>,
}

impl Ledger {
    /// Builds the ledger from whatever the store holds. A missing or unreadable
    /// snapshot yields factory defaults. The session always starts out
    /// not started.
    pub fn load(store: Box<dyn SnapshotStore>, default_language: Language) -> Self {
        let mut ledger = Self {
            players: Vec::new(),
            initial_amount: DEFAULT_INITIAL_AMOUNT,
            unit: AmountUnit::default(),
            language: default_language,
            session: Session::default(),
            store,
        };

        match ledger.store.load() {
            Ok(Some(snapshot)) => {
                info!(
                    "Restored {} players from stored snapshot",
                    snapshot.players.len()
                );
                ledger.players = snapshot.players;
                ledger.initial_amount = match snapshot.initial_amount {
                    0 => DEFAULT_INITIAL_AMOUNT,
                    n => n,
                };
                ledger.unit = snapshot.amount_unit;
                if let Some(language) = snapshot.language {
                    ledger.language = language;
                }
            }
            Ok(None) => debug!("No stored snapshot, starting with defaults"),
            Err(e) => warn!("Failed to load player data: {}", e),
        }

        ledger
    }

    #[cfg(test)]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn ranked_players(&self) -> Vec<&Player> {
        rank(&self.players)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn initial_amount(&self) -> u32 {
        self.initial_amount
    }

    pub fn unit(&self) -> AmountUnit {
        self.unit
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_started(&self) -> bool {
        self.session.started
    }

    pub fn game_id(&self) -> Option<u64> {
        self.session.game_id
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.session.log
    }

    /// Balance every player gets on start and restart.
    pub fn starting_balance(&self) -> i64 {
        i64::from(self.initial_amount) * self.unit.multiplier()
    }

    /// Zero falls back to the default of 15.
    pub fn set_initial_amount(&mut self, amount: u32) {
        self.initial_amount = if amount == 0 {
            DEFAULT_INITIAL_AMOUNT
        } else {
            amount
        };
        self.persist();
    }

    pub fn set_unit(&mut self, unit: AmountUnit) {
        self.unit = unit;
        self.persist();
    }

    pub fn set_language(&mut self, language: Language) {
        if self.language == language {
            return;
        }
        self.language = language;
        self.persist();
    }

    /// Adds a player with either the given balance or the session default.
    pub fn add_player(
        &mut self,
        name: &str,
        balance: Option<(f64, AmountUnit)>,
    ) -> Result<PlayerId, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(ValidationError::TooManyPlayers);
        }
        if self.players.iter().any(|p| p.name == name) {
            return Err(ValidationError::DuplicateName(name.to_string()));
        }

        let (amount, unit, balance) = match balance {
            Some((amount, unit)) => (amount, unit, unit.to_balance(amount)?),
            None => (
                f64::from(self.initial_amount),
                self.unit,
                self.starting_balance(),
            ),
        };

        let id = self.mint_player_id();
        self.players.push(Player {
            id,
            name: name.to_string(),
            balance,
        });
        info!("Added player {} ({}) with balance {}", name, id, balance);

        self.log_action(GameAction::AddPlayer {
            player_name: name.to_string(),
            amount,
            unit,
            balance,
        });
        self.persist();

        Ok(id)
    }

    /// Removes a player. Unknown ids are ignored. Removal is not logged.
    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        if self.players.len() == before {
            return false;
        }

        info!("Removed player {}", id);
        self.persist();
        true
    }

    /// Resets every balance, opens a fresh log and marks the game started.
    pub fn start_game(&mut self) -> Result<u64, ValidationError> {
        if self.players.len() < MIN_PLAYERS {
            return Err(ValidationError::NotEnoughPlayers);
        }

        self.reset_balances();
        let game_id = self.mint_game_id();
        self.session = Session {
            started: true,
            game_id: Some(game_id),
            log: Vec::new(),
        };
        info!(
            "Game {} started with {} players",
            game_id,
            self.players.len()
        );

        self.log_action(GameAction::GameStart {
            initial_amount: self.initial_amount,
            unit: self.unit,
        });
        self.persist();

        Ok(game_id)
    }

    /// Resets every balance under a new game id. The log keeps its history.
    pub fn restart_game(&mut self, confirmation: &dyn Confirmation) -> Result<u64, LedgerError> {
        self.require(confirmation, ConfirmPrompt::RestartGame)?;

        self.reset_balances();
        let game_id = self.mint_game_id();
        self.session.game_id = Some(game_id);
        info!("Game restarted as {}", game_id);

        self.log_action(GameAction::GameRestart {
            initial_amount: self.initial_amount,
            unit: self.unit,
        });
        self.persist();

        Ok(game_id)
    }

    /// Moves money between two players. The source may not go below the
    /// transferred amount.
    pub fn transfer(
        &mut self,
        from: PlayerId,
        to: PlayerId,
        amount: f64,
        unit: AmountUnit,
    ) -> Result<(), ValidationError> {
        let units = unit.to_units(amount)?;
        let from_idx = self.index_of(from)?;
        let to_idx = self.index_of(to)?;

        let source = &self.players[from_idx];
        if source.balance < units {
            return Err(ValidationError::InsufficientBalance(source.name.clone()));
        }
        if from_idx != to_idx {
            let credited = self.players[to_idx]
                .balance
                .checked_add(units)
                .ok_or(ValidationError::InvalidAmount)?;
            self.players[from_idx].balance -= units;
            self.players[to_idx].balance = credited;
        }

        let from_player = self.players[from_idx].name.clone();
        let to_player = self.players[to_idx].name.clone();
        info!("{} transferred {} to {}", from_player, units, to_player);

        self.log_action(GameAction::Transfer {
            from_player,
            to_player,
            amount,
            unit,
        });
        self.persist();

        Ok(())
    }

    /// Adds to or subtracts from one balance. There is no floor.
    pub fn adjust_balance(
        &mut self,
        id: PlayerId,
        amount: f64,
        unit: AmountUnit,
        operation: Operation,
    ) -> Result<i64, ValidationError> {
        let units = unit.to_units(amount)?;
        let idx = self.index_of(id)?;

        let player = &mut self.players[idx];
        player.balance = match operation {
            Operation::Add => player.balance.checked_add(units),
            Operation::Subtract => player.balance.checked_sub(units),
        }
        .ok_or(ValidationError::InvalidAmount)?;

        let new_balance = player.balance;
        let player_name = player.name.clone();
        info!("Balance of {} adjusted to {}", player_name, new_balance);

        self.log_action(GameAction::BalanceAdjust {
            player_name,
            operation,
            amount,
            unit,
            new_balance,
        });
        self.persist();

        Ok(new_balance)
    }

    /// Empties the current log. Players and balances stay.
    pub fn clear_current_log(&mut self, confirmation: &dyn Confirmation) -> Result<(), LedgerError> {
        self.require(confirmation, ConfirmPrompt::ClearHistory)?;

        self.session.log.clear();
        info!("Cleared current game log");
        Ok(())
    }

    /// Back to factory defaults, including the stored snapshot. The language
    /// preference is kept.
    pub fn clear_all_data(&mut self, confirmation: &dyn Confirmation) -> Result<(), LedgerError> {
        self.require(confirmation, ConfirmPrompt::ClearAllData)?;

        self.players.clear();
        self.initial_amount = DEFAULT_INITIAL_AMOUNT;
        self.unit = AmountUnit::default();
        self.session = Session::default();

        if let Err(e) = self.store.erase() {
            warn!("Failed to erase stored player data: {}", e);
        }
        info!("All data cleared");
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            players: self.players.clone(),
            initial_amount: self.initial_amount,
            amount_unit: self.unit,
            language: Some(self.language),
            last_updated: Some(chrono::Utc::now()),
        }
    }

    fn require(
        &self,
        confirmation: &dyn Confirmation,
        prompt: ConfirmPrompt,
    ) -> Result<(), LedgerError> {
        if confirmation.confirm(prompt, self.language) {
            Ok(())
        } else {
            debug!("{:?} declined", prompt);
            Err(LedgerError::NotConfirmed(prompt))
        }
    }

    fn index_of(&self, id: PlayerId) -> Result<usize, ValidationError> {
        self.players
            .iter()
            .position(|p| p.id == id)
            .ok_or(ValidationError::UnknownPlayer(id))
    }

    fn reset_balances(&mut self) {
        let balance = self.starting_balance();
        for player in &mut self.players {
            player.balance = balance;
        }
    }

    fn log_action(&mut self, action: GameAction) {
        if !self.session.started {
            return;
        }
        self.session.log.push(LogEntry::new(action, &self.players));
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.snapshot()) {
            warn!("Failed to save player data: {}", e);
        }
    }

    fn mint_player_id(&self) -> PlayerId {
        let mut rng = rand::thread_rng();
        loop {
            let id = rng.gen_range(1..player::MAX_PLAYER_ID);
            if self.player(id).is_none() {
                return id;
            }
        }
    }

    fn mint_game_id(&self) -> u64 {
        let mut rng = rand::thread_rng();
        loop {
            let id: u64 = rng.gen();
            if Some(id) != self.session.game_id {
                return id;
            }
        }
    }
}
