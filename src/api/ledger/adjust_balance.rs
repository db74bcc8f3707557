use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::api::ledger::{ledger_state, lock, validation_error, SharedLedger};
use crate::ledger::{AmountUnit, Operation, PlayerId};

#[derive(Deserialize)]
pub struct BalanceChange {
    amount: f64,
    unit: AmountUnit,
    operation: Operation,
}

#[post("/ledger/players/{player_id}/balance")]
pub async fn adjust_balance(
    path: web::Path<PlayerId>,
    body: web::Json<BalanceChange>,
    shared: SharedLedger,
) -> impl Responder {
    let mut ledger = match lock(&shared) {
        Ok(l) => l,
        Err(r) => return r,
    };

    match ledger.adjust_balance(path.into_inner(), body.amount, body.unit, body.operation) {
        Ok(new_balance) => HttpResponse::Ok().json(json!({
            "newBalance": new_balance,
            "ledger": ledger_state(&ledger),
        })),
        Err(e) => validation_error(&e, ledger.language()),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    use crate::api;
    use crate::api::ledger::testing::shared_ledger;
    use crate::ledger::AmountUnit;

    #[actix_web::test]
    async fn subtract_below_zero_is_allowed() {
        let (shared, _) = shared_ledger();
        let id = shared
            .lock()
            .unwrap()
            .add_player("Ann", Some((10.0, AmountUnit::Thousand)))
            .unwrap();
        let app = test::init_service(App::new().app_data(shared).configure(api::configure)).await;

        let req = test::TestRequest::post()
            .uri(&format!("/ledger/players/{}/balance", id))
            .set_json(json!({ "amount": 15, "unit": "K", "operation": "subtract" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["newBalance"], -5_000);
        assert_eq!(body["ledger"]["players"][0]["formatted"], "-5.0K");
    }

    #[actix_web::test]
    async fn unknown_player_is_bad_request() {
        let (shared, _) = shared_ledger();
        let app = test::init_service(App::new().app_data(shared).configure(api::configure)).await;

        let req = test::TestRequest::post()
            .uri("/ledger/players/42/balance")
            .set_json(json!({ "amount": 1, "unit": "M", "operation": "add" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
