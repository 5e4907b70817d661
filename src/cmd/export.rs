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

use crate::cmd::print_json;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::review::ReviewHistoryEntry;

pub fn export_collection(coll: &Collection) -> Fallible<()> {
    let export: Export = get_export(coll)?;
    print_json(&export)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export {
    cards: Vec<CardExport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardExport {
    #[serde(flatten)]
    card: Card,
    history: Vec<ReviewHistoryEntry>,
}

fn get_export(coll: &Collection) -> Fallible<Export> {
    let mut cards: Vec<CardExport> = Vec::new();
    for card in coll.db().all_cards()? {
        let history = coll.db().history(card.id)?;
        cards.push(CardExport { card, history });
    }
    Ok(Export { cards })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::error::ErrorReport;
    use crate::types::card::NewCard;
    use crate::types::card_type::CardType;
    use crate::types::timestamp::Timestamp;

    #[test]
    fn test_export() -> Fallible<()> {
        let coll = Collection::from_database(Database::in_memory()?, "ar".to_string());
        let now = Timestamp::parse("2025-05-10T09:00:00Z")?;
        let card = NewCard {
            language_code: "ar".to_string(),
            card_type: CardType::Vocab,
            front: "pen".to_string(),
            back: "قلم".to_string(),
            vocab_id: Some(3),
            conjugation_id: None,
        };
        let card_id = coll
            .db()
            .add_card(&card, now)?
            .ok_or_else(|| ErrorReport::new("card was skipped"))?;
        coll.submit_review(card_id, 0, now)?;

        let export = get_export(&coll)?;
        let json = serde_json::to_value(&export)?;
        assert_eq!(json["cards"][0]["front"], "pen");
        assert_eq!(json["cards"][0]["vocabId"], 3);
        assert_eq!(json["cards"][0]["repetitions"], 0);
        assert_eq!(json["cards"][0]["interval"], 1);
        assert_eq!(json["cards"][0]["history"][0]["quality"], 0);
        assert_eq!(json["cards"][0]["history"][0]["easeFactor"], 1.7);
        Ok(())
    }
}
