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

use serde::Deserialize;
use serde::Serialize;

use crate::types::card_id::CardId;
use crate::types::card_state::CardState;
use crate::types::card_type::CardType;
use crate::types::timestamp::Timestamp;

/// A flashcard together with its scheduling metadata.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub language_code: String,
    pub card_type: CardType,
    pub front: String,
    pub back: String,
    /// The vocabulary entry this card was generated from, if any.
    pub vocab_id: Option<i64>,
    /// The conjugation this card was generated from, if any.
    pub conjugation_id: Option<i64>,
    #[serde(flatten)]
    pub state: CardState,
    pub next_review: Timestamp,
    pub created_at: Timestamp,
}

impl Card {
    /// Whether the card is due at the given instant.
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review <= now
    }

    pub fn is_weak(&self) -> bool {
        self.state.is_weak()
    }
}

/// The content needed to create a card. Scheduling fields take their
/// defaults.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub language_code: String,
    pub card_type: CardType,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub vocab_id: Option<i64>,
    #[serde(default)]
    pub conjugation_id: Option<i64>,
}
