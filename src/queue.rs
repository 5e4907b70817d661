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

//! Card selection: which cards to study, and in what order.

use std::cmp::Ordering;
use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Serialize;

use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

#[derive(ValueEnum, Serialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueueMode {
    /// Every card, due cards first.
    #[default]
    Default,
    /// Difficult or never-learned cards, regardless of due date.
    Weakest,
}

impl QueueMode {
    /// Interpret the `mode` query parameter. Anything other than `weakest`
    /// selects the default queue.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("weakest") => QueueMode::Weakest,
            _ => QueueMode::Default,
        }
    }
}

impl Display for QueueMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueMode::Default => write!(f, "default"),
            QueueMode::Weakest => write!(f, "weakest"),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Queue {
    pub cards: Vec<Card>,
    pub total_count: usize,
    /// Cards in scope due now, whatever the mode.
    pub due_count: usize,
    pub mode: QueueMode,
}

/// Build a review queue from every card in a scope.
pub fn build_queue(cards: Vec<Card>, mode: QueueMode, now: Timestamp) -> Queue {
    let due_count = count_due(&cards, now);
    let cards = match mode {
        QueueMode::Default => order_by_due(cards, now),
        QueueMode::Weakest => weakest(cards),
    };
    Queue {
        total_count: cards.len(),
        cards,
        due_count,
        mode,
    }
}

pub fn count_due(cards: &[Card], now: Timestamp) -> usize {
    cards.iter().filter(|card| card.is_due(now)).count()
}

pub fn count_weak(cards: &[Card]) -> usize {
    cards.iter().filter(|card| card.is_weak()).count()
}

/// Due cards before cards not yet due, then soonest first, then hardest
/// first.
pub fn order_by_due(mut cards: Vec<Card>, now: Timestamp) -> Vec<Card> {
    cards.sort_by(|a, b| {
        b.is_due(now)
            .cmp(&a.is_due(now))
            .then_with(|| a.next_review.cmp(&b.next_review))
            .then_with(|| compare_ease(a, b))
            .then_with(|| a.id.cmp(&b.id))
    });
    cards
}

/// Cards with a below-default ease factor or no successful reviews, hardest
/// first.
pub fn weakest(cards: Vec<Card>) -> Vec<Card> {
    let mut cards: Vec<Card> = cards.into_iter().filter(|card| card.is_weak()).collect();
    cards.sort_by(|a, b| {
        compare_ease(a, b)
            .then_with(|| a.state.repetitions.cmp(&b.state.repetitions))
            .then_with(|| a.id.cmp(&b.id))
    });
    cards
}

fn compare_ease(a: &Card, b: &Card) -> Ordering {
    a.state.ease_factor.total_cmp(&b.state.ease_factor)
}
