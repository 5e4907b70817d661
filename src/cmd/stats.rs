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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;

use crate::cmd::print_json;
use crate::cmd::resolve_scope;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::queue::QueueMode;
use crate::types::card_type::CardType;
use crate::types::timestamp::Timestamp;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// One `name: count` line per statistic.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_stats(
    coll: &Collection,
    lang: Option<String>,
    card_type: Option<CardType>,
    format: StatsFormat,
) -> Fallible<()> {
    let scope = resolve_scope(coll, lang, card_type)?;
    let stats = coll.get_stats(&scope, Timestamp::now())?;
    match format {
        StatsFormat::Text => {
            println!("total: {}", stats.total_cards);
            println!("due: {}", stats.due_cards);
            println!("weak: {}", stats.weak_count);
            println!("reviewed today: {}", stats.reviewed_today);
        }
        StatsFormat::Json => {
            print_json(&stats)?;
        }
    }
    Ok(())
}

pub fn print_queue(
    coll: &Collection,
    lang: Option<String>,
    card_type: Option<CardType>,
    mode: QueueMode,
) -> Fallible<()> {
    let scope = resolve_scope(coll, lang, card_type)?;
    let queue = coll.list_queue(&scope, mode, Timestamp::now())?;
    print_json(&queue)
}
