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
use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    /// A vocabulary term: English on the front, the target word on the back.
    Vocab,
    /// A single conjugated verb form.
    Conjugation,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Vocab => "vocab",
            CardType::Conjugation => "conjugation",
        }
    }

    /// Interpret an optional query-string filter. Unknown values are ignored
    /// rather than rejected, so `?cardType=all` means "no filter".
    pub fn from_filter(value: Option<&str>) -> Option<CardType> {
        value.and_then(|value| CardType::try_from(value).ok())
    }
}

impl TryFrom<&str> for CardType {
    type Error = ErrorReport;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "vocab" => Ok(CardType::Vocab),
            "conjugation" => Ok(CardType::Conjugation),
            _ => Err(ErrorReport::invalid_input(format!(
                "Invalid card type: {value}"
            ))),
        }
    }
}

impl Display for CardType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for CardType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for CardType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        CardType::try_from(string.as_str()).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
