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

use chrono::DateTime;
use chrono::Days;
use chrono::Local;
use chrono::SecondsFormat;
use chrono::TimeDelta;
use chrono::Timelike;
use chrono::Utc;
use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Serialize;

use crate::error::Fallible;

/// Milliseconds since the epoch of 9999-12-31T23:59:59.999Z, the last instant
/// whose RFC 3339 form has a four-digit year.
const MAX_MILLIS: i64 = 253_402_300_799_999;

/// An instant in time, stored as a UTC RFC 3339 string with millisecond
/// precision. The fixed width makes lexicographic order match chronological
/// order, so timestamps can be compared directly in SQL.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    #[cfg(test)]
    pub fn new(ts: DateTime<Utc>) -> Self {
        Self(ts)
    }

    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn parse(s: &str) -> Fallible<Self> {
        let ts = DateTime::parse_from_rfc3339(s)?;
        Ok(Self(ts.with_timezone(&Utc)))
    }

    #[cfg(test)]
    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }

    pub fn to_rfc3339(self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Midnight, local time, at the start of the day containing this instant.
    pub fn local_midnight(self) -> Self {
        let local = self.0.with_timezone(&Local);
        let midnight = local
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .and_then(|naive| naive.and_local_timezone(Local).earliest());
        match midnight {
            Some(midnight) => Self(midnight.with_timezone(&Utc)),
            None => {
                // Midnight was skipped by a DST transition.
                let elapsed = TimeDelta::seconds(i64::from(local.num_seconds_from_midnight()));
                Self(self.0 - elapsed)
            }
        }
    }

    /// The latest representable timestamp. Anything later could not be read
    /// back from the database.
    pub fn max() -> Self {
        match DateTime::from_timestamp_millis(MAX_MILLIS) {
            Some(ts) => Self(ts),
            None => Self(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Advance by a number of calendar days in the local time zone. The
    /// wall-clock time is preserved across DST transitions, so the elapsed
    /// duration may differ from `days * 24h`.
    ///
    /// Saturates at [`Timestamp::max`].
    pub fn add_days(self, days: u32) -> Self {
        let local = self.0.with_timezone(&Local);
        let later = match local.checked_add_days(Days::new(u64::from(days))) {
            Some(later) => Some(later.with_timezone(&Utc)),
            None => TimeDelta::try_days(i64::from(days))
                .and_then(|delta| self.0.checked_add_signed(delta)),
        };
        let max = Self::max();
        match later {
            Some(later) if later <= max.0 => Self(later),
            _ => max,
        }
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl ToSql for Timestamp {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_rfc3339()))
    }
}

impl FromSql for Timestamp {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        let ts =
            DateTime::parse_from_rfc3339(&string).map_err(|e| FromSqlError::Other(Box::new(e)))?;
        Ok(Timestamp(ts.with_timezone(&Utc)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_rfc3339_is_fixed_width() -> Fallible<()> {
        let a = Timestamp::parse("2025-01-02T03:04:05Z")?;
        let b = Timestamp::parse("2025-01-02T03:04:05.5+00:00")?;
        assert_eq!(a.to_rfc3339(), "2025-01-02T03:04:05.000Z");
        assert_eq!(b.to_rfc3339(), "2025-01-02T03:04:05.500Z");
        assert!(a.to_rfc3339() < b.to_rfc3339());
        Ok(())
    }

    #[test]
    fn test_parse_offset() -> Fallible<()> {
        let ts = Timestamp::parse("2025-06-01T12:00:00+02:00")?;
        assert_eq!(ts.to_rfc3339(), "2025-06-01T10:00:00.000Z");
        Ok(())
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn test_local_midnight() -> Fallible<()> {
        let ts = Timestamp::parse("2025-03-15T15:30:00Z")?;
        let midnight = ts.local_midnight();
        assert!(midnight <= ts);
        assert!(ts.into_inner() - midnight.into_inner() < TimeDelta::hours(25));
        let local = midnight.into_inner().with_timezone(&Local);
        assert_eq!(local.date_naive(), ts.into_inner().with_timezone(&Local).date_naive());
        Ok(())
    }

    #[test]
    fn test_add_days() -> Fallible<()> {
        let ts = Timestamp::parse("2025-03-15T15:30:00Z")?;
        assert_eq!(ts.add_days(0), ts);
        let later = ts.add_days(6).into_inner().with_timezone(&Local);
        let expected: NaiveDate = ts.into_inner().with_timezone(&Local).date_naive() + Days::new(6);
        assert_eq!(later.date_naive(), expected);
        assert_eq!(
            later.time(),
            ts.into_inner().with_timezone(&Local).time()
        );
        Ok(())
    }

    #[test]
    fn test_add_days_saturates() -> Fallible<()> {
        let ts = Timestamp::parse("2025-03-15T15:30:00Z")?;
        assert_eq!(ts.add_days(u32::MAX), Timestamp::max());
        assert_eq!(ts.add_days(3_000_000), Timestamp::max());
        assert_eq!(Timestamp::max().add_days(1), Timestamp::max());
        assert_eq!(Timestamp::max().to_rfc3339(), "9999-12-31T23:59:59.999Z");
        let parsed = Timestamp::parse(&Timestamp::max().to_rfc3339())?;
        assert_eq!(parsed, Timestamp::max());
        Ok(())
    }
}
