use actix_web::{delete, web, HttpResponse, Responder};
use log::debug;

use crate::api::ledger::{ledger_state, lock, SharedLedger};
use crate::ledger::PlayerId;

#[delete("/ledger/players/{player_id}")]
pub async fn remove_player(path: web::Path<PlayerId>, shared: SharedLedger) -> impl Responder {
    let mut ledger = match lock(&shared) {
        Ok(l) => l,
        Err(r) => return r,
    };

    let id = path.into_inner();
    if !ledger.remove_player(id) {
        debug!("Remove requested for unknown player {}", id);
    }

    HttpResponse::Ok().json(ledger_state(&ledger))
}
