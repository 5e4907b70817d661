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

use serde::Serialize;

use crate::types::card_id::CardId;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// One row of the append-only review log.
#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReviewHistoryEntry {
    pub id: i64,
    pub card_id: CardId,
    pub quality: Quality,
    /// The ease factor the review produced.
    pub ease_factor: f64,
    /// The interval the review produced.
    pub interval: u32,
    pub reviewed_at: Timestamp,
}
