use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::api::ledger::{ledger_state, lock, validation_error, AmountInput, SharedLedger};

#[derive(Deserialize)]
pub struct NewPlayer {
    name: String,
    balance: Option<AmountInput>,
}

#[post("/ledger/players")]
pub async fn add_player(body: web::Json<NewPlayer>, shared: SharedLedger) -> impl Responder {
    let mut ledger = match lock(&shared) {
        Ok(l) => l,
        Err(r) => return r,
    };

    let balance = body.balance.map(|b| (b.amount, b.unit));
    match ledger.add_player(&body.name, balance) {
        Ok(id) => HttpResponse::Ok().json(json!({
            "id": id,
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

    #[actix_web::test]
    async fn adds_player_with_override() {
        let (shared, _) = shared_ledger();
        let app = test::init_service(
            App::new()
                .app_data(shared.clone())
                .configure(api::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/ledger/players")
            .set_json(json!({ "name": "Ann", "balance": { "amount": 2.5, "unit": "K" } }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let id = body["id"].as_u64().unwrap();
        assert_eq!(body["ledger"]["players"][0]["name"], "Ann");
        assert_eq!(body["ledger"]["players"][0]["formatted"], "2.5K");
        assert_eq!(shared.lock().unwrap().player(id).unwrap().balance, 2_500);
    }

    #[actix_web::test]
    async fn duplicate_name_is_bad_request() {
        let (shared, _) = shared_ledger();
        let app = test::init_service(App::new().app_data(shared).configure(api::configure)).await;

        for expected in [StatusCode::OK, StatusCode::BAD_REQUEST] {
            let req = test::TestRequest::post()
                .uri("/ledger/players")
                .set_json(json!({ "name": "Ann" }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);

            if expected == StatusCode::BAD_REQUEST {
                let body: Value = test::read_body_json(resp).await;
                assert_eq!(body["error"], "Player name already exists");
            }
        }
    }
}
