use actix_web::{delete, HttpRequest, HttpResponse, Responder};

use crate::api::ledger::{ledger_error, ledger_state, lock, HeaderConfirmation, SharedLedger};

#[delete("/ledger")]
pub async fn clear_all_data(req: HttpRequest, shared: SharedLedger) -> impl Responder {
    let mut ledger = match lock(&shared) {
        Ok(l) => l,
        Err(r) => return r,
    };

    let confirmation = HeaderConfirmation::from_request(&req);
    match ledger.clear_all_data(&confirmation) {
        Ok(()) => HttpResponse::Ok().json(ledger_state(&ledger)),
        Err(e) => ledger_error(&e, ledger.language()),
    }
}
