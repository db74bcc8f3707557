use actix_web::{patch, web, HttpResponse, Responder};
use serde::Deserialize;

use crate::api::ledger::{ledger_state, lock, SharedLedger};
use crate::i18n::Language;
use crate::ledger::AmountUnit;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    initial_amount: Option<u32>,
    unit: Option<AmountUnit>,
    language: Option<Language>,
}

#[patch("/ledger/settings")]
pub async fn update_settings(
    body: web::Json<SettingsPatch>,
    shared: SharedLedger,
) -> impl Responder {
    let mut ledger = match lock(&shared) {
        Ok(l) => l,
        Err(r) => return r,
    };

    let body = body.into_inner();
    if let Some(amount) = body.initial_amount {
        ledger.set_initial_amount(amount);
    }
    if let Some(unit) = body.unit {
        ledger.set_unit(unit);
    }
    if let Some(language) = body.language {
        ledger.set_language(language);
    }

    HttpResponse::Ok().json(ledger_state(&ledger))
}
