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

/// The ease factor a card starts with.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// The ease factor never drops below this.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// The SM-2 scheduling fields of a card.
#[derive(Serialize, Clone, Copy, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CardState {
    /// Multiplier controlling how fast intervals grow. Always at least
    /// [`MIN_EASE_FACTOR`].
    pub ease_factor: f64,
    /// Days until the next review. Zero only for a card never reviewed.
    pub interval: u32,
    /// Consecutive correct reviews since the last reset.
    pub repetitions: u32,
}

impl CardState {
    pub fn is_weak(&self) -> bool {
        self.ease_factor < DEFAULT_EASE_FACTOR || self.repetitions == 0
    }
}

impl Default for CardState {
    fn default() -> Self {
        Self {
            ease_factor: DEFAULT_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
        }
    }
}
