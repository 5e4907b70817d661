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

//! The SM-2 scheduler: a pure function from a card's scheduling state and a
//! review grade to its next state.

use crate::types::card_state::CardState;
use crate::types::card_state::MIN_EASE_FACTOR;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// The interval after the first correct review.
const FIRST_INTERVAL: u32 = 1;

/// The interval after the second consecutive correct review.
const SECOND_INTERVAL: u32 = 6;

/// The interval after an incorrect review.
const RESET_INTERVAL: u32 = 1;

/// The result of scheduling a review.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Outcome {
    pub state: CardState,
    pub next_review: Timestamp,
}

pub fn schedule(state: CardState, quality: Quality, now: Timestamp) -> Outcome {
    let ease_factor = new_ease_factor(state.ease_factor, quality);
    let (repetitions, interval) = if quality.is_correct() {
        let repetitions = state.repetitions.saturating_add(1);
        let interval = match repetitions {
            1 => FIRST_INTERVAL,
            2 => SECOND_INTERVAL,
            // Uses the unrounded ease factor.
            _ => grow_interval(state.interval, ease_factor),
        };
        (repetitions, interval)
    } else {
        (0, RESET_INTERVAL)
    };
    Outcome {
        state: CardState {
            ease_factor: round_ease_factor(ease_factor),
            interval,
            repetitions,
        },
        next_review: now.add_days(interval),
    }
}

/// The updated ease factor, clamped but not rounded.
fn new_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    let d = f64::from(Quality::MAX - quality.value());
    let ease_factor = ease_factor + (0.1 - d * (0.08 + d * 0.02));
    if ease_factor < MIN_EASE_FACTOR {
        MIN_EASE_FACTOR
    } else {
        ease_factor
    }
}

/// Rounds half away from zero. Intervals and ease factors are positive, so
/// this is the same as rounding half up.
fn grow_interval(interval: u32, ease_factor: f64) -> u32 {
    (f64::from(interval) * ease_factor).round() as u32
}

fn round_ease_factor(ease_factor: f64) -> f64 {
    (ease_factor * 100.0).round() / 100.0
}
