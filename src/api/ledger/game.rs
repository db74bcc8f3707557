use actix_web::{post, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use crate::api::ledger::{
    ledger_error, ledger_state, lock, validation_error, HeaderConfirmation, SharedLedger,
};

#[post("/ledger/game/start")]
pub async fn start_game(shared: SharedLedger) -> impl Responder {
    let mut ledger = match lock(&shared) {
        Ok(l) => l,
        Err(r) => return r,
    };

    match ledger.start_game() {
        Ok(game_id) => HttpResponse::Ok().json(json!({
            "gameId": game_id.to_string(),
            "ledger": ledger_state(&ledger),
        })),
        Err(e) => validation_error(&e, ledger.language()),
    }
}

#[post("/ledger/game/restart")]
pub async fn restart_game(req: HttpRequest, shared: SharedLedger) -> impl Responder {
    let mut ledger = match lock(&shared) {
        Ok(l) => l,
        Err(r) => return r,
    };

    let confirmation = HeaderConfirmation::from_request(&req);
    match ledger.restart_game(&confirmation) {
        Ok(game_id) => HttpResponse::Ok().json(json!({
            "gameId": game_id.to_string(),
            "ledger": ledger_state(&ledger),
        })),
        Err(e) => ledger_error(&e, ledger.language()),
    }
}
