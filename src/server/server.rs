// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::future::pending;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use serde_json::Value;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;

use crate::collection::Collection;
use crate::config::Config;
use crate::error::Fallible;
use crate::server::get::history_handler;
use crate::server::get::queue_handler;
use crate::server::get::stats_handler;
use crate::server::post::add_card_handler;
use crate::server::post::delete_card_handler;
use crate::server::post::review_handler;
use crate::server::state::ServerState;

pub async fn start_server(config: Config) -> Fallible<()> {
    let collection = Collection::new(&config)?;
    let app = router(ServerState { collection });
    let bind = config.bind.as_str();
    log::info!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped.");
    Ok(())
}

pub fn router(state: ServerState) -> Router {
    let app = Router::new();
    let app = app.route("/api/flashcards", get(queue_handler));
    let app = app.route("/api/flashcards", post(add_card_handler));
    let app = app.route("/api/flashcards/stats", get(stats_handler));
    let app = app.route("/api/flashcards/review", post(review_handler));
    let app = app.route("/api/flashcards/{id}", delete(delete_card_handler));
    let app = app.route("/api/flashcards/{id}/history", get(history_handler));
    let app = app.fallback(not_found_handler);
    app.with_state(state)
}

async fn not_found_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" })))
}

async fn shutdown_signal() {
    if let Err(e) = ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {e}");
        pending::<()>().await;
    }
}
