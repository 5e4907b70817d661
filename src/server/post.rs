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
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::collection::ReviewResult;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::server::state::ServerState;
use crate::types::card::NewCard;
use crate::types::card_id::CardId;
use crate::types::timestamp::Timestamp;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBody {
    flashcard_id: Option<CardId>,
    quality: Option<i64>,
}

pub async fn review_handler(
    State(state): State<ServerState>,
    body: Result<Json<ReviewBody>, JsonRejection>,
) -> Fallible<Json<ReviewResult>> {
    let Json(body) = body?;
    let (Some(card_id), Some(quality)) = (body.flashcard_id, body.quality) else {
        return Err(ErrorReport::invalid_input(
            "flashcardId and quality are required",
        ));
    };
    let result = state
        .collection
        .submit_review(card_id, quality, Timestamp::now())?;
    Ok(Json(result))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCardResponse {
    /// `None` when the card was skipped for having no answer.
    flashcard_id: Option<CardId>,
}

pub async fn add_card_handler(
    State(state): State<ServerState>,
    card: Result<Json<NewCard>, JsonRejection>,
) -> Fallible<Json<AddCardResponse>> {
    let Json(card) = card?;
    let flashcard_id = state.collection.db().add_card(&card, Timestamp::now())?;
    Ok(Json(AddCardResponse { flashcard_id }))
}

pub async fn delete_card_handler(
    State(state): State<ServerState>,
    Path(card_id): Path<CardId>,
) -> Fallible<StatusCode> {
    state.collection.db().delete_card(card_id)?;
    Ok(StatusCode::NO_CONTENT)
}
