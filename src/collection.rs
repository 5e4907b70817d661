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

use crate::config::Config;
use crate::db::ACTIVE_LANGUAGE_KEY;
use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::queue::Queue;
use crate::queue::QueueMode;
use crate::queue::build_queue;
use crate::sm2::schedule;
use crate::stats::Stats;
use crate::stats::aggregate;
use crate::types::card_id::CardId;
use crate::types::card_state::CardState;
use crate::types::quality::Quality;
use crate::types::review::ReviewHistoryEntry;
use crate::types::scope::Scope;
use crate::types::timestamp::Timestamp;

/// The user's cards and review history, and the operations on them.
#[derive(Clone)]
pub struct Collection {
    db: Database,
    default_language: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    pub flashcard_id: CardId,
    pub quality: Quality,
    pub new_state: NewState,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewState {
    #[serde(flatten)]
    pub state: CardState,
    pub next_review: Timestamp,
}

impl Collection {
    pub fn new(config: &Config) -> Fallible<Self> {
        log::debug!("Opening database at {}", config.database);
        let db = Database::new(&config.database, &config.default_language)?;
        Ok(Self::from_database(db, config.default_language.clone()))
    }

    pub fn from_database(db: Database, default_language: String) -> Self {
        Self {
            db,
            default_language,
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// The language the user is studying: the `activeLanguage` setting, or
    /// the configured default.
    pub fn active_language(&self) -> Fallible<String> {
        match self.db.setting(ACTIVE_LANGUAGE_KEY)? {
            Some(language) => Ok(language),
            None => Ok(self.default_language.clone()),
        }
    }

    /// Grade a card. The quality is checked before storage is touched, so an
    /// out-of-range grade leaves no trace.
    pub fn submit_review(
        &self,
        card_id: CardId,
        quality: i64,
        now: Timestamp,
    ) -> Fallible<ReviewResult> {
        let quality = Quality::new(quality)?;
        let outcome = self
            .db
            .apply_review(card_id, quality, now, |state| schedule(state, quality, now))?;
        log::debug!(
            "card={card_id} q={quality} EF={:.2} I={}d R={} due={}",
            outcome.state.ease_factor,
            outcome.state.interval,
            outcome.state.repetitions,
            outcome.next_review
        );
        Ok(ReviewResult {
            flashcard_id: card_id,
            quality,
            new_state: NewState {
                state: outcome.state,
                next_review: outcome.next_review,
            },
        })
    }

    pub fn list_queue(&self, scope: &Scope, mode: QueueMode, now: Timestamp) -> Fallible<Queue> {
        let cards = self.db.cards_in_scope(scope)?;
        Ok(build_queue(cards, mode, now))
    }

    /// Summary counts. "Today" starts at local midnight.
    pub fn get_stats(&self, scope: &Scope, now: Timestamp) -> Fallible<Stats> {
        let cards = self.db.cards_in_scope(scope)?;
        let reviewed_today = self.db.count_reviews_since(scope, now.local_midnight())?;
        Ok(aggregate(&cards, reviewed_today, now))
    }

    /// A card's review history, newest first.
    pub fn history(&self, card_id: CardId) -> Fallible<Vec<ReviewHistoryEntry>> {
        if self.db.get_card(card_id)?.is_none() {
            return Err(ErrorReport::not_found("Flashcard not found"));
        }
        self.db.history(card_id)
    }
}
