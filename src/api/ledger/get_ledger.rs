use actix_web::{get, HttpResponse, Responder};

use crate::api::ledger::{ledger_state, lock, SharedLedger};

#[get("/ledger")]
pub async fn get_ledger(shared: SharedLedger) -> impl Responder {
    let ledger = match lock(&shared) {
        Ok(l) => l,
        Err(r) => return r,
    };

    HttpResponse::Ok().json(ledger_state(&ledger))
}
