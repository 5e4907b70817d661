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

use axum::Json;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use serde::Deserialize;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::queue::Queue;
use crate::queue::QueueMode;
use crate::server::state::ServerState;
use crate::stats::Stats;
use crate::types::card_id::CardId;
use crate::types::card_type::CardType;
use crate::types::review::ReviewHistoryEntry;
use crate::types::scope::Scope;
use crate::types::timestamp::Timestamp;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeParams {
    lang: Option<String>,
    card_type: Option<String>,
    mode: Option<String>,
}

impl ScopeParams {
    fn scope(&self, collection: &Collection) -> Fallible<Scope> {
        let language_code = match &self.lang {
            Some(lang) if !lang.is_empty() => lang.clone(),
            _ => collection.active_language()?,
        };
        let card_type = CardType::from_filter(self.card_type.as_deref());
        Ok(Scope::new(language_code, card_type))
    }
}

pub async fn queue_handler(
    State(state): State<ServerState>,
    Query(params): Query<ScopeParams>,
) -> Fallible<Json<Queue>> {
    let scope = params.scope(&state.collection)?;
    let mode = QueueMode::from_param(params.mode.as_deref());
    let queue = state
        .collection
        .list_queue(&scope, mode, Timestamp::now())?;
    Ok(Json(queue))
}

pub async fn stats_handler(
    State(state): State<ServerState>,
    Query(params): Query<ScopeParams>,
) -> Fallible<Json<Stats>> {
    let scope = params.scope(&state.collection)?;
    let stats = state.collection.get_stats(&scope, Timestamp::now())?;
    Ok(Json(stats))
}

pub async fn history_handler(
    State(state): State<ServerState>,
    Path(card_id): Path<CardId>,
) -> Fallible<Json<Vec<ReviewHistoryEntry>>> {
    let history = state.collection.history(card_id)?;
    Ok(Json(history))
}
