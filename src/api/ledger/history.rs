use actix_web::{delete, get, HttpRequest, HttpResponse, Responder};
use serde_json::{json, Value};

use crate::api::ledger::{ledger_error, lock, HeaderConfirmation, SharedLedger};

/// Current session log, newest first, each entry rendered in the ledger's
/// language.
#[get("/ledger/history")]
pub async fn get_history(shared: SharedLedger) -> impl Responder {
    let ledger = match lock(&shared) {
        Ok(l) => l,
        Err(r) => return r,
    };

    let language = ledger.language();
    let entries: Vec<Value> = ledger
        .log()
        .iter()
        .rev()
        .map(|entry| {
            let line = entry.describe(language);
            json!({
                "timestamp": entry.timestamp,
                "time": line.time,
                "action": entry.action,
                "description": line.action,
                "balances": line.balances,
            })
        })
        .collect();

    HttpResponse::Ok().json(entries)
}

#[delete("/ledger/history")]
pub async fn clear_history(req: HttpRequest, shared: SharedLedger) -> impl Responder {
    let mut ledger = match lock(&shared) {
        Ok(l) => l,
        Err(r) => return r,
    };

    let confirmation = HeaderConfirmation::from_request(&req);
    match ledger.clear_current_log(&confirmation) {
        Ok(()) => HttpResponse::Ok().json(json!({ "cleared": true })),
        Err(e) => ledger_error(&e, ledger.language()),
    }
}
