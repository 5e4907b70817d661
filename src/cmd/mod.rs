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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::card_type::CardType;
use crate::types::scope::Scope;

pub mod add;
pub mod export;
pub mod review;
pub mod stats;

/// The scope named on the command line, defaulting to the active language.
fn resolve_scope(
    coll: &Collection,
    lang: Option<String>,
    card_type: Option<CardType>,
) -> Fallible<Scope> {
    let language_code = match lang {
        Some(lang) => lang,
        None => coll.active_language()?,
    };
    Ok(Scope::new(language_code, card_type))
}

fn print_json<T: Serialize>(value: &T) -> Fallible<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
