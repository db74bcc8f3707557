pub mod add_player;
pub mod adjust_balance;
pub mod clear_data;
pub mod game;
pub mod get_ledger;
pub mod history;
pub mod remove_player;
pub mod transfer;
pub mod update_settings;

use std::sync::{Mutex, MutexGuard};

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use log::error;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::i18n::Language;
use crate::ledger::{
    format_amount, AmountUnit, ConfirmPrompt, Confirmation, Ledger, LedgerError, ValidationError,
};

pub type SharedLedger = web::Data<Mutex<Ledger>>;

/// Header carrying the user's answer to a destructive action.
pub const CONFIRM_HEADER: &str = "X-Confirm";

/// Magnitude plus unit, as entered by the user.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AmountInput {
    pub amount: f64,
    pub unit: AmountUnit,
}

pub fn lock(ledger: &SharedLedger) -> Result<MutexGuard<'_, Ledger>, HttpResponse> {
    ledger.lock().map_err(|_| {
        error!("Ledger mutex poisoned");
        HttpResponse::InternalServerError().json(json!({ "error": "Ledger state unavailable" }))
    })
}

/// Confirmation answered up front by the `X-Confirm` request header.
pub struct HeaderConfirmation {
    confirmed: bool,
}

impl HeaderConfirmation {
    pub fn from_request(req: &HttpRequest) -> Self {
        let confirmed = req
            .headers()
            .get(CONFIRM_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "yes" | "true" | "1"))
            .unwrap_or(false);

        Self { confirmed }
    }
}

impl Confirmation for HeaderConfirmation {
    fn confirm(&self, _prompt: ConfirmPrompt, _language: Language) -> bool {
        self.confirmed
    }
}

pub fn validation_error(err: &ValidationError, language: Language) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": language.validation_message(err) }))
}

pub fn ledger_error(err: &LedgerError, language: Language) -> HttpResponse {
    match err {
        LedgerError::Validation(e) => validation_error(e, language),
        LedgerError::NotConfirmed(prompt) => HttpResponse::build(StatusCode::PRECONDITION_REQUIRED)
            .json(json!({
                "error": "Confirmation required",
                "confirm": language.confirm_prompt(*prompt),
                "header": CONFIRM_HEADER,
            })),
    }
}

/// Session state plus ranked players. Game ids are strings since they use
/// the full u64 range.
pub fn ledger_state(ledger: &Ledger) -> Value {
    json!({
        "started": ledger.is_started(),
        "gameId": ledger.game_id().map(|id| id.to_string()),
        "initialAmount": ledger.initial_amount(),
        "unit": ledger.unit(),
        "language": ledger.language(),
        "startingBalance": ledger.starting_balance(),
        "players": ledger.ranked_players().iter().map(|p| json!({
            "id": p.id,
            "name": p.name,
            "balance": p.balance,
            "formatted": format_amount(p.balance),
        })).collect::<Vec<Value>>(),
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use actix_web::web;

    use super::SharedLedger;
    use crate::data_source::MemoryStore;
    use crate::i18n::Language;
    use crate::ledger::Ledger;

    pub fn shared_ledger() -> (SharedLedger, MemoryStore) {
        let store = MemoryStore::new();
        let ledger = Ledger::load(Box::new(store.clone()), Language::En);
        (web::Data::new(Mutex::new(ledger)), store)
    }
}
