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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use clap::ValueEnum;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::Transaction;
use rusqlite::TransactionBehavior;
use rusqlite::config::DbConfig;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::sm2::Outcome;
use crate::types::card::Card;
use crate::types::card::NewCard;
use crate::types::card_id::CardId;
use crate::types::card_state::CardState;
use crate::types::card_type::CardType;
use crate::types::quality::Quality;
use crate::types::review::ReviewHistoryEntry;
use crate::types::scope::Scope;
use crate::types::timestamp::Timestamp;

/// The language seeded into a fresh database.
pub const DEFAULT_LANGUAGE_CODE: &str = "ar";

/// The settings key holding the language the user is studying.
pub const ACTIVE_LANGUAGE_KEY: &str = "activeLanguage";

const CARD_COLUMNS: &str = "card_id, language_code, card_type, front, back, vocab_id, conjugation_id, ease_factor, interval, repetitions, next_review, created_at";

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open a database, creating it if needed. A fresh database starts with
    /// `active_language` as the active language.
    pub fn new(database_path: &str, active_language: &str) -> Fallible<Self> {
        let conn = Connection::open(database_path)?;
        Self::from_connection(conn, active_language)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        Self::from_connection(Connection::open_in_memory()?, DEFAULT_LANGUAGE_CODE)
    }

    fn from_connection(mut conn: Connection, active_language: &str) -> Fallible<Self> {
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating database schema.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.ensure_defaults(active_language, Timestamp::now())?;
        Ok(db)
    }

    /// Insert the default language and settings if they are missing. Safe to
    /// call any number of times: an active language already set is kept.
    pub fn ensure_defaults(&self, active_language: &str, now: Timestamp) -> Fallible<()> {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        tx.execute(
            "insert or ignore into languages (language_code, name, direction, created_at) values (?, ?, ?, ?);",
            (
                DEFAULT_LANGUAGE_CODE,
                "Arabic (MSA)",
                TextDirection::Rtl.as_str(),
                now,
            ),
        )?;
        tx.execute(
            "insert or ignore into settings (key, value, updated_at) values (?, ?, ?);",
            (ACTIVE_LANGUAGE_KEY, active_language, now),
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Register a language cards can be created in.
    pub fn add_language(
        &self,
        language_code: &str,
        name: &str,
        direction: TextDirection,
        now: Timestamp,
    ) -> Fallible<()> {
        let conn = self.acquire();
        conn.execute(
            "insert into languages (language_code, name, direction, created_at) values (?, ?, ?, ?) on conflict (language_code) do update set name = excluded.name, direction = excluded.direction;",
            (language_code, name, direction.as_str(), now),
        )?;
        Ok(())
    }

    /// Read a setting, if it has been set.
    pub fn setting(&self, key: &str) -> Fallible<Option<String>> {
        let conn = self.acquire();
        let value = conn
            .query_row("select value from settings where key = ?;", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Add a new card, due immediately.
    ///
    /// Returns `None` for a vocabulary card with no translation. If a card
    /// generated from the same source record already exists, returns its ID
    /// instead of inserting a duplicate.
    pub fn add_card(&self, card: &NewCard, now: Timestamp) -> Fallible<Option<CardId>> {
        if card.card_type == CardType::Vocab && card.back.trim().is_empty() {
            log::debug!("Skipping untranslated vocabulary card: {}", card.front);
            return Ok(None);
        }
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        if !language_exists(&tx, &card.language_code)? {
            return Err(ErrorReport::invalid_input(format!(
                "unknown language: {}",
                card.language_code
            )));
        }
        if let Some(existing) = find_by_source(&tx, card)? {
            log::debug!("Card from the same source already exists: {existing}");
            return Ok(Some(existing));
        }
        let state = CardState::default();
        let sql = "insert into flashcards (language_code, card_type, front, back, vocab_id, conjugation_id, ease_factor, interval, repetitions, next_review, created_at) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) returning card_id;";
        let card_id: CardId = tx.query_row(
            sql,
            (
                &card.language_code,
                card.card_type,
                card.front.trim(),
                card.back.trim(),
                card.vocab_id,
                card.conjugation_id,
                state.ease_factor,
                state.interval,
                state.repetitions,
                now,
                now,
            ),
            |row| row.get(0),
        )?;
        tx.commit()?;
        log::debug!("Added card {card_id}.");
        Ok(Some(card_id))
    }

    pub fn get_card(&self, card_id: CardId) -> Fallible<Option<Card>> {
        let conn = self.acquire();
        let sql = format!("select {CARD_COLUMNS} from flashcards where card_id = ?;");
        let card = conn.query_row(&sql, [card_id], card_from_row).optional()?;
        Ok(card)
    }

    /// Every card in a scope, in no particular order.
    pub fn cards_in_scope(&self, scope: &Scope) -> Fallible<Vec<Card>> {
        let conn = self.acquire();
        let sql = format!(
            "select {CARD_COLUMNS} from flashcards where language_code = ?1 and (?2 is null or card_type = ?2);"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map((&scope.language_code, scope.card_type), card_from_row)?;
        let mut cards = Vec::new();
        for card in rows {
            cards.push(card?);
        }
        Ok(cards)
    }

    /// Every card, ordered by ID.
    pub fn all_cards(&self) -> Fallible<Vec<Card>> {
        let conn = self.acquire();
        let sql = format!("select {CARD_COLUMNS} from flashcards order by card_id;");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], card_from_row)?;
        let mut cards = Vec::new();
        for card in rows {
            cards.push(card?);
        }
        Ok(cards)
    }

    /// Apply a review to a card as a single transaction: read the current
    /// state, compute the new one with `schedule`, write it back, and append
    /// a history entry. Either all of it happens or none of it does.
    ///
    /// Holding the connection lock for the whole transaction means two
    /// reviews of the same card cannot interleave between the read and the
    /// write. The transaction is `IMMEDIATE` so that other processes sharing
    /// the file are excluded as well.
    pub fn apply_review<F>(
        &self,
        card_id: CardId,
        quality: Quality,
        reviewed_at: Timestamp,
        schedule: F,
    ) -> Fallible<Outcome>
    where
        F: FnOnce(CardState) -> Outcome,
    {
        let mut conn = self.acquire();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let state: Option<CardState> = tx
            .query_row(
                "select ease_factor, interval, repetitions from flashcards where card_id = ?;",
                [card_id],
                |row| {
                    Ok(CardState {
                        ease_factor: row.get(0)?,
                        interval: row.get(1)?,
                        repetitions: row.get(2)?,
                    })
                },
            )
            .optional()?;
        let Some(state) = state else {
            return Err(ErrorReport::not_found("Flashcard not found"));
        };
        let outcome = schedule(state);
        tx.execute(
            "update flashcards set ease_factor = ?, interval = ?, repetitions = ?, next_review = ? where card_id = ?;",
            (
                outcome.state.ease_factor,
                outcome.state.interval,
                outcome.state.repetitions,
                outcome.next_review,
                card_id,
            ),
        )?;
        insert_review(
            &tx,
            &InsertReview {
                card_id,
                quality,
                ease_factor: outcome.state.ease_factor,
                interval: outcome.state.interval,
                reviewed_at,
            },
        )?;
        tx.commit()?;
        Ok(outcome)
    }

    /// A card's review history, newest first.
    pub fn history(&self, card_id: CardId) -> Fallible<Vec<ReviewHistoryEntry>> {
        let conn = self.acquire();
        let sql = "select review_id, card_id, quality, ease_factor, interval, reviewed_at from review_history where card_id = ? order by reviewed_at desc, review_id desc;";
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([card_id], |row| {
            Ok(ReviewHistoryEntry {
                id: row.get(0)?,
                card_id: row.get(1)?,
                quality: row.get(2)?,
                ease_factor: row.get(3)?,
                interval: row.get(4)?,
                reviewed_at: row.get(5)?,
            })
        })?;
        let mut entries = Vec::new();
        for entry in rows {
            entries.push(entry?);
        }
        Ok(entries)
    }

    /// The number of reviews of cards in a scope at or after `since`.
    pub fn count_reviews_since(&self, scope: &Scope, since: Timestamp) -> Fallible<usize> {
        let conn = self.acquire();
        let sql = "select count(*) from review_history r inner join flashcards f on f.card_id = r.card_id where f.language_code = ?1 and (?2 is null or f.card_type = ?2) and r.reviewed_at >= ?3;";
        let count: i64 = conn.query_row(
            sql,
            (&scope.language_code, scope.card_type, since),
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Delete a card. Its history goes with it.
    pub fn delete_card(&self, card_id: CardId) -> Fallible<()> {
        let conn = self.acquire();
        let deleted = conn.execute("delete from flashcards where card_id = ?;", [card_id])?;
        if deleted == 0 {
            return Err(ErrorReport::not_found("Flashcard not found"));
        }
        log::debug!("Deleted card {card_id}.");
        Ok(())
    }

    fn acquire(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }
}

fn card_from_row(row: &Row) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        language_code: row.get(1)?,
        card_type: row.get(2)?,
        front: row.get(3)?,
        back: row.get(4)?,
        vocab_id: row.get(5)?,
        conjugation_id: row.get(6)?,
        state: CardState {
            ease_factor: row.get(7)?,
            interval: row.get(8)?,
            repetitions: row.get(9)?,
        },
        next_review: row.get(10)?,
        created_at: row.get(11)?,
    })
}

fn language_exists(tx: &Transaction, language_code: &str) -> Fallible<bool> {
    let sql = "select count(*) from languages where language_code = ?;";
    let count: i64 = tx.query_row(sql, [language_code], |row| row.get(0))?;
    Ok(count > 0)
}

fn find_by_source(tx: &Transaction, card: &NewCard) -> Fallible<Option<CardId>> {
    let existing: Option<CardId> = match (card.vocab_id, card.conjugation_id) {
        (Some(vocab_id), _) => tx
            .query_row(
                "select card_id from flashcards where card_type = ? and vocab_id = ?;",
                (card.card_type, vocab_id),
                |row| row.get(0),
            )
            .optional()?,
        (None, Some(conjugation_id)) => tx
            .query_row(
                "select card_id from flashcards where card_type = ? and conjugation_id = ?;",
                (card.card_type, conjugation_id),
                |row| row.get(0),
            )
            .optional()?,
        (None, None) => None,
    };
    Ok(existing)
}

struct InsertReview {
    card_id: CardId,
    quality: Quality,
    ease_factor: f64,
    interval: u32,
    reviewed_at: Timestamp,
}

type ReviewId = i64;

fn insert_review(tx: &Transaction, review: &InsertReview) -> Fallible<ReviewId> {
    let sql = "insert into review_history (card_id, quality, ease_factor, interval, reviewed_at) values (?, ?, ?, ?, ?) returning review_id;";
    let review_id: ReviewId = tx.query_row(
        sql,
        (
            review.card_id,
            review.quality,
            review.ease_factor,
            review.interval,
            review.reviewed_at,
        ),
        |row| row.get(0),
    )?;
    Ok(review_id)
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["flashcards"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use tempfile::tempdir;

    use super::*;
    use crate::error::ErrorKind;
    use crate::sm2::schedule;
    use crate::types::card_state::MIN_EASE_FACTOR;

    fn now() -> Timestamp {
        Timestamp::parse("2025-05-10T09:00:00Z").unwrap()
    }

    fn later(hours: i64) -> Timestamp {
        Timestamp::new(now().into_inner() + TimeDelta::hours(hours))
    }

    fn vocab(language_code: &str, front: &str, back: &str) -> NewCard {
        NewCard {
            language_code: language_code.to_string(),
            card_type: CardType::Vocab,
            front: front.to_string(),
            back: back.to_string(),
            vocab_id: None,
            conjugation_id: None,
        }
    }

    fn conjugation(front: &str, back: &str, conjugation_id: i64) -> NewCard {
        NewCard {
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            card_type: CardType::Conjugation,
            front: front.to_string(),
            back: back.to_string(),
            vocab_id: None,
            conjugation_id: Some(conjugation_id),
        }
    }

    fn add(db: &Database, card: &NewCard) -> Fallible<CardId> {
        db.add_card(card, now())?
            .ok_or_else(|| ErrorReport::new("card was skipped"))
    }

    #[test]
    fn test_reopen_existing_database() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("zaban.db");
        let path = path.to_str().ok_or_else(|| ErrorReport::new("invalid path"))?;
        let card_id = {
            let db = Database::new(path, "ar")?;
            add(&db, &vocab("ar", "book", "كتاب"))?
        };
        // The language chosen on first open sticks.
        let db = Database::new(path, "fa")?;
        assert!(db.get_card(card_id)?.is_some());
        assert_eq!(db.setting(ACTIVE_LANGUAGE_KEY)?, Some("ar".to_string()));
        Ok(())
    }

    #[test]
    fn test_ensure_defaults_is_idempotent() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.ensure_defaults("ar", now())?;
        db.ensure_defaults("fa", later(1))?;
        assert_eq!(db.setting(ACTIVE_LANGUAGE_KEY)?, Some("ar".to_string()));
        assert_eq!(db.setting("missing")?, None);
        Ok(())
    }

    #[test]
    fn test_add_language_renames_existing() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.add_language("fa", "Persian", TextDirection::Ltr, now())?;
        db.add_language("fa", "Farsi", TextDirection::Rtl, later(1))?;
        let languages: Vec<(String, String, String, Timestamp)> = {
            let conn = db.acquire();
            let mut stmt = conn.prepare(
                "select language_code, name, direction, created_at from languages order by language_code;",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?;
            rows.collect::<Result<_, _>>()?
        };
        assert_eq!(languages.len(), 2);
        assert_eq!(
            languages[1],
            ("fa".to_string(), "Farsi".to_string(), "rtl".to_string(), now())
        );
        Ok(())
    }

    #[test]
    fn test_add_card_defaults() -> Fallible<()> {
        let db = Database::in_memory()?;
        let card_id = add(&db, &vocab("ar", "  house ", "بيت"))?;
        let card = db
            .get_card(card_id)?
            .ok_or_else(|| ErrorReport::new("missing card"))?;
        assert_eq!(card.front, "house");
        assert_eq!(card.state, CardState::default());
        assert_eq!(card.next_review, now());
        assert_eq!(card.created_at, now());
        assert!(card.is_due(now()));
        Ok(())
    }

    #[test]
    fn test_add_untranslated_vocab_is_skipped() -> Fallible<()> {
        let db = Database::in_memory()?;
        assert_eq!(db.add_card(&vocab("ar", "house", " "), now())?, None);
        assert!(db.all_cards()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_add_card_from_same_source_is_not_duplicated() -> Fallible<()> {
        let db = Database::in_memory()?;
        let first = add(&db, &conjugation("كتب: past / he", "كَتَبَ", 7))?;
        let second = add(&db, &conjugation("كتب: past / he", "كَتَبَ", 7))?;
        assert_eq!(first, second);
        let third = add(&db, &conjugation("كتب: past / she", "كَتَبَتْ", 8))?;
        assert_ne!(first, third);
        assert_eq!(db.all_cards()?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_add_card_unknown_language() -> Fallible<()> {
        let db = Database::in_memory()?;
        let result = db.add_card(&vocab("fa", "book", "کتاب"), now());
        assert_eq!(result.err().map(|e| e.kind()), Some(ErrorKind::InvalidInput));
        db.add_language("fa", "Persian", TextDirection::Rtl, now())?;
        assert!(db.add_card(&vocab("fa", "book", "کتاب"), now())?.is_some());
        Ok(())
    }

    #[test]
    fn test_cards_in_scope() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.add_language("fa", "Persian", TextDirection::Rtl, now())?;
        let a = add(&db, &vocab("ar", "book", "كتاب"))?;
        let b = add(&db, &conjugation("كتب: past / he", "كَتَبَ", 1))?;
        let c = add(&db, &vocab("fa", "book", "کتاب"))?;

        let mut ids: Vec<CardId> = db
            .cards_in_scope(&Scope::language("ar"))?
            .iter()
            .map(|card| card.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec![a, b]);

        let ids: Vec<CardId> = db
            .cards_in_scope(&Scope::new("ar", Some(CardType::Conjugation)))?
            .iter()
            .map(|card| card.id)
            .collect();
        assert_eq!(ids, vec![b]);

        let ids: Vec<CardId> = db
            .cards_in_scope(&Scope::language("fa"))?
            .iter()
            .map(|card| card.id)
            .collect();
        assert_eq!(ids, vec![c]);

        assert!(db.cards_in_scope(&Scope::language("de"))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_apply_review() -> Fallible<()> {
        let db = Database::in_memory()?;
        let card_id = add(&db, &vocab("ar", "book", "كتاب"))?;
        let quality = Quality::new(4)?;
        let outcome = db.apply_review(card_id, quality, later(1), |state| {
            schedule(state, quality, later(1))
        })?;
        assert_eq!(outcome.state.repetitions, 1);
        assert_eq!(outcome.state.interval, 1);

        let card = db
            .get_card(card_id)?
            .ok_or_else(|| ErrorReport::new("missing card"))?;
        assert_eq!(card.state, outcome.state);
        assert_eq!(card.next_review, outcome.next_review);

        let history = db.history(card_id)?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].card_id, card_id);
        assert_eq!(history[0].quality, quality);
        assert_eq!(history[0].interval, 1);
        assert_eq!(history[0].reviewed_at, later(1));
        Ok(())
    }

    #[test]
    fn test_history_is_newest_first() -> Fallible<()> {
        let db = Database::in_memory()?;
        let card_id = add(&db, &vocab("ar", "book", "كتاب"))?;
        for (hour, grade) in [(1, 5), (30, 5), (200, 1)] {
            let quality = Quality::new(grade)?;
            db.apply_review(card_id, quality, later(hour), |state| {
                schedule(state, quality, later(hour))
            })?;
        }
        let history = db.history(card_id)?;
        let qualities: Vec<u8> = history.iter().map(|entry| entry.quality.value()).collect();
        assert_eq!(qualities, vec![1, 5, 5]);
        let intervals: Vec<u32> = history.iter().map(|entry| entry.interval).collect();
        assert_eq!(intervals, vec![1, 6, 1]);
        Ok(())
    }

    #[test]
    fn test_apply_review_unknown_card() -> Fallible<()> {
        let db = Database::in_memory()?;
        let quality = Quality::GOOD;
        let result = db.apply_review(CardId::new(99), quality, now(), |state| {
            schedule(state, quality, now())
        });
        assert_eq!(result.err().map(|e| e.kind()), Some(ErrorKind::NotFound));
        assert!(db.history(CardId::new(99))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_concurrent_reviews_are_serialized() -> Fallible<()> {
        const REVIEWS_PER_THREAD: u32 = 25;
        let db = Database::in_memory()?;
        let card_id = add(&db, &vocab("ar", "book", "كتاب"))?;
        let quality = Quality::GOOD;
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let db = db.clone();
                    s.spawn(move || -> Fallible<()> {
                        for _ in 0..REVIEWS_PER_THREAD {
                            db.apply_review(card_id, quality, now(), |state| {
                                schedule(state, quality, now())
                            })?;
                        }
                        Ok(())
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap()?;
            }
            Ok::<(), ErrorReport>(())
        })?;

        let card = db
            .get_card(card_id)?
            .ok_or_else(|| ErrorReport::new("missing card"))?;
        assert_eq!(card.state.repetitions, 2 * REVIEWS_PER_THREAD);
        assert_eq!(card.state.ease_factor, MIN_EASE_FACTOR);
        let history = db.history(card_id)?;
        assert_eq!(history.len(), 2 * REVIEWS_PER_THREAD as usize);
        Ok(())
    }

    #[test]
    fn test_failed_review_is_rolled_back() -> Fallible<()> {
        let db = Database::in_memory()?;
        let card_id = add(&db, &vocab("ar", "book", "كتاب"))?;
        let quality = Quality::GOOD;
        // The ease factor violates the column's check constraint.
        let result = db.apply_review(card_id, quality, later(1), |state| Outcome {
            state: CardState {
                ease_factor: 1.0,
                interval: 3,
                repetitions: state.repetitions + 1,
            },
            next_review: later(72),
        });
        assert_eq!(result.err().map(|e| e.kind()), Some(ErrorKind::Internal));

        let card = db
            .get_card(card_id)?
            .ok_or_else(|| ErrorReport::new("missing card"))?;
        assert_eq!(card.state, CardState::default());
        assert_eq!(card.next_review, now());
        assert!(db.history(card_id)?.is_empty());

        // The connection is still usable afterwards.
        db.apply_review(card_id, quality, later(2), |state| {
            schedule(state, quality, later(2))
        })?;
        assert_eq!(db.history(card_id)?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_count_reviews_since() -> Fallible<()> {
        let db = Database::in_memory()?;
        let a = add(&db, &vocab("ar", "book", "كتاب"))?;
        let b = add(&db, &conjugation("كتب: past / he", "كَتَبَ", 1))?;
        let review = |card_id: CardId, at: Timestamp| -> Fallible<()> {
            let quality = Quality::GOOD;
            db.apply_review(card_id, quality, at, |state| schedule(state, quality, at))?;
            Ok(())
        };
        review(a, later(-30))?;
        review(a, later(1))?;
        review(b, later(2))?;
        review(b, later(3))?;

        assert_eq!(db.count_reviews_since(&Scope::language("ar"), now())?, 3);
        assert_eq!(
            db.count_reviews_since(&Scope::new("ar", Some(CardType::Vocab)), now())?,
            1
        );
        assert_eq!(db.count_reviews_since(&Scope::language("ar"), later(-48))?, 4);
        assert_eq!(db.count_reviews_since(&Scope::language("fa"), later(-48))?, 0);
        Ok(())
    }

    #[test]
    fn test_delete_card_removes_history() -> Fallible<()> {
        let db = Database::in_memory()?;
        let card_id = add(&db, &vocab("ar", "book", "كتاب"))?;
        let quality = Quality::AGAIN;
        db.apply_review(card_id, quality, now(), |state| schedule(state, quality, now()))?;
        assert_eq!(db.history(card_id)?.len(), 1);
        db.delete_card(card_id)?;
        assert!(db.get_card(card_id)?.is_none());
        assert!(db.history(card_id)?.is_empty());
        assert_eq!(db.count_reviews_since(&Scope::language("ar"), later(-1))?, 0);
        let again = db.delete_card(card_id);
        assert_eq!(again.err().map(|e| e.kind()), Some(ErrorKind::NotFound));
        Ok(())
    }
}
