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
use std::str::FromStr;

use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// An SM-2 review grade in `0..=5`. Grades below 3 count as incorrect.
#[derive(Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[serde(transparent)]
pub struct Quality(u8);

impl Quality {
    /// Complete blackout.
    pub const AGAIN: Quality = Quality(0);
    pub const HARD: Quality = Quality(2);
    pub const GOOD: Quality = Quality(3);
    /// Perfect response.
    pub const EASY: Quality = Quality(5);

    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Fallible<Self> {
        match u8::try_from(value) {
            Ok(value) if value <= Self::MAX => Ok(Self(value)),
            _ => Err(ErrorReport::invalid_input(
                "quality must be between 0 and 5",
            )),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_correct(self) -> bool {
        self.0 >= 3
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accepts either a number or one of the button labels.
impl FromStr for Quality {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "again" => Ok(Quality::AGAIN),
            "hard" => Ok(Quality::HARD),
            "good" => Ok(Quality::GOOD),
            "easy" => Ok(Quality::EASY),
            other => match other.parse::<i64>() {
                Ok(n) => Quality::new(n),
                Err(_) => Err(ErrorReport::invalid_input(format!(
                    "invalid quality: {s}"
                ))),
            },
        }
    }
}

impl ToSql for Quality {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(self.0)))
    }
}

impl FromSql for Quality {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let n: i64 = FromSql::column_result(value)?;
        Quality::new(n).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_range() {
        for n in 0..=5 {
            assert!(Quality::new(n).is_ok());
        }
        for n in [-1, 6, 255, 256, i64::MIN, i64::MAX] {
            let kind = Quality::new(n).err().map(|e| e.kind());
            assert_eq!(kind, Some(ErrorKind::InvalidInput));
        }
    }

    #[test]
    fn test_is_correct() -> Fallible<()> {
        assert!(!Quality::new(2)?.is_correct());
        assert!(Quality::new(3)?.is_correct());
        Ok(())
    }

    #[test]
    fn test_from_str() -> Fallible<()> {
        assert_eq!("Again".parse::<Quality>()?, Quality::AGAIN);
        assert_eq!("easy".parse::<Quality>()?, Quality::EASY);
        assert_eq!("4".parse::<Quality>()?, Quality::new(4)?);
        assert!("7".parse::<Quality>().is_err());
        assert!("meh".parse::<Quality>().is_err());
        Ok(())
    }
}
