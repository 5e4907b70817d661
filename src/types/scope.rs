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

use crate::types::card_type::CardType;

/// The subset of the card population a query ranges over.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Scope {
    pub language_code: String,
    pub card_type: Option<CardType>,
}

impl Scope {
    pub fn new(language_code: impl Into<String>, card_type: Option<CardType>) -> Self {
        Self {
            language_code: language_code.into(),
            card_type,
        }
    }

    /// Every card in a language.
    #[cfg(test)]
    pub fn language(language_code: impl Into<String>) -> Self {
        Self::new(language_code, None)
    }
}
