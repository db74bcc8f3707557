use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;

use crate::api::ledger::{ledger_state, lock, validation_error, SharedLedger};
use crate::ledger::{AmountUnit, PlayerId};

#[derive(Deserialize)]
pub struct TransferBody {
    from: PlayerId,
    to: PlayerId,
    amount: f64,
    unit: AmountUnit,
}

#[post("/ledger/transfers")]
pub async fn transfer(body: web::Json<TransferBody>, shared: SharedLedger) -> impl Responder {
    let mut ledger = match lock(&shared) {
        Ok(l) => l,
        Err(r) => return r,
    };

    match ledger.transfer(body.from, body.to, body.amount, body.unit) {
        Ok(()) => HttpResponse::Ok().json(ledger_state(&ledger)),
        Err(e) => validation_error(&e, ledger.language()),
    }
}
