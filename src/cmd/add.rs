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

use crate::cmd::resolve_scope;
use crate::collection::Collection;
use crate::db::TextDirection;
use crate::error::Fallible;
use crate::types::card::NewCard;
use crate::types::card_id::CardId;
use crate::types::card_type::CardType;
use crate::types::timestamp::Timestamp;

pub fn add_card(
    coll: &Collection,
    lang: Option<String>,
    card_type: CardType,
    front: String,
    back: String,
    vocab_id: Option<i64>,
    conjugation_id: Option<i64>,
) -> Fallible<()> {
    let scope = resolve_scope(coll, lang, Some(card_type))?;
    let card = NewCard {
        language_code: scope.language_code,
        card_type,
        front,
        back,
        vocab_id,
        conjugation_id,
    };
    match coll.db().add_card(&card, Timestamp::now())? {
        Some(card_id) => println!("{card_id}"),
        None => eprintln!("Skipped: the card has no answer."),
    }
    Ok(())
}

pub fn add_language(
    coll: &Collection,
    code: &str,
    name: &str,
    direction: TextDirection,
) -> Fallible<()> {
    coll.db()
        .add_language(code, name, direction, Timestamp::now())?;
    println!("ok");
    Ok(())
}

pub fn delete_card(coll: &Collection, card_id: CardId) -> Fallible<()> {
    coll.db().delete_card(card_id)?;
    println!("ok");
    Ok(())
}
