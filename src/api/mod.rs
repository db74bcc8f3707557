pub mod ledger;
pub mod llm;

use actix_web::web;

/// Registers every HTTP service. Shared by `main` and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(ledger::get_ledger::get_ledger)
        .service(ledger::update_settings::update_settings)
        .service(ledger::add_player::add_player)
        .service(ledger::remove_player::remove_player)
        .service(ledger::adjust_balance::adjust_balance)
        .service(ledger::transfer::transfer)
        .service(ledger::game::start_game)
        .service(ledger::game::restart_game)
        .service(ledger::history::get_history)
        .service(ledger::history::clear_history)
        .service(ledger::clear_data::clear_all_data)
        .service(llm::proxy_llm::proxy_llm)
        .service(llm::llm_preflight::llm_preflight);
}
