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

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

use crate::cmd::add::add_card;
use crate::cmd::add::add_language;
use crate::cmd::add::delete_card;
use crate::cmd::export::export_collection;
use crate::cmd::review::print_history;
use crate::cmd::review::review_card;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_queue;
use crate::cmd::stats::print_stats;
use crate::collection::Collection;
use crate::config::Config;
use crate::config::Overrides;
use crate::db::TextDirection;
use crate::error::Fallible;
use crate::queue::QueueMode;
use crate::server::server::start_server;
use crate::types::card_id::CardId;
use crate::types::card_type::CardType;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the config file. Defaults to `zaban.toml` if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path to the database. Overrides the config file and `ZABAN_DB`.
    #[arg(long, global = true)]
    database: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API.
    Serve {
        /// Address to listen on. Overrides the config file and `ZABAN_BIND`.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Print the review queue.
    Queue {
        /// Language code. Defaults to the active language.
        #[arg(long)]
        lang: Option<String>,
        #[arg(long)]
        card_type: Option<CardType>,
        #[arg(long, default_value_t = QueueMode::Default)]
        mode: QueueMode,
    },
    /// Print collection statistics.
    Stats {
        /// Language code. Defaults to the active language.
        #[arg(long)]
        lang: Option<String>,
        #[arg(long)]
        card_type: Option<CardType>,
        #[arg(long, default_value_t = StatsFormat::Json)]
        format: StatsFormat,
    },
    /// Grade a card.
    Review {
        card_id: CardId,
        /// A grade from 0 to 5, or one of: again, hard, good, easy.
        quality: String,
    },
    /// Print a card's review history.
    History { card_id: CardId },
    /// Add a card.
    Add {
        #[arg(long)]
        lang: Option<String>,
        #[arg(long, default_value = "vocab")]
        card_type: CardType,
        front: String,
        back: String,
        /// The vocabulary entry the card is generated from.
        #[arg(long)]
        vocab_id: Option<i64>,
        /// The conjugation the card is generated from.
        #[arg(long)]
        conjugation_id: Option<i64>,
    },
    /// Register a language, or rename an existing one.
    AddLanguage {
        code: String,
        name: String,
        #[arg(long, default_value = "ltr")]
        direction: TextDirection,
    },
    /// Delete a card and its history.
    Delete { card_id: CardId },
    /// Export all cards and their review history as JSON.
    Export,
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let bind = match &cli.command {
        Command::Serve { bind } => bind.clone(),
        _ => None,
    };
    let overrides = Overrides {
        database: cli.database,
        bind,
    };
    let config = Config::load(cli.config.as_deref(), overrides)?;
    match cli.command {
        Command::Serve { .. } => start_server(config).await,
        Command::Queue {
            lang,
            card_type,
            mode,
        } => {
            let coll = Collection::new(&config)?;
            print_queue(&coll, lang, card_type, mode)
        }
        Command::Stats {
            lang,
            card_type,
            format,
        } => {
            let coll = Collection::new(&config)?;
            print_stats(&coll, lang, card_type, format)
        }
        Command::Review { card_id, quality } => {
            let coll = Collection::new(&config)?;
            review_card(&coll, card_id, &quality)
        }
        Command::History { card_id } => {
            let coll = Collection::new(&config)?;
            print_history(&coll, card_id)
        }
        Command::Add {
            lang,
            card_type,
            front,
            back,
            vocab_id,
            conjugation_id,
        } => {
            let coll = Collection::new(&config)?;
            add_card(&coll, lang, card_type, front, back, vocab_id, conjugation_id)
        }
        Command::AddLanguage {
            code,
            name,
            direction,
        } => {
            let coll = Collection::new(&config)?;
            add_language(&coll, &code, &name, direction)
        }
        Command::Delete { card_id } => {
            let coll = Collection::new(&config)?;
            delete_card(&coll, card_id)
        }
        Command::Export => {
            let coll = Collection::new(&config)?;
            export_collection(&coll)
        }
    }
}
