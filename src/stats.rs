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

use crate::queue::count_due;
use crate::queue::count_weak;
use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

/// Summary counts for a scope.
#[derive(Serialize, Clone, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_cards: usize,
    pub due_cards: usize,
    pub weak_count: usize,
    pub reviewed_today: usize,
}

/// Aggregate over a scope's cards. `reviewed_today` comes from the review
/// log, which the cards alone cannot answer.
pub fn aggregate(cards: &[Card], reviewed_today: usize, now: Timestamp) -> Stats {
    Stats {
        total_cards: cards.len(),
        due_cards: count_due(cards, now),
        weak_count: count_weak(cards),
        reviewed_today,
    }
}
