//! Row-level data model: records, columns and cell values.

use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format used when writing tables.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp formats accepted when reading tables.
const TIMESTAMP_INPUT_FORMATS: &[&str] = &[TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M:%S"];

/// Parses a timestamp in either the space- or `T`-separated ISO-8601 form.
pub(crate) fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}

/// One of the four symbolic categories attached to each guess.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Category {
    A,
    B,
    C,
    D,
}

impl Category {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [Self::A, Self::B, Self::C, Self::D];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown category '{symbol}' (expected one of A, B, C, D)")]
pub struct ParseCategoryError {
    #[error(not(source))]
    pub symbol: String,
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError {
                symbol: s.to_owned(),
            })
    }
}

/// A named column of the guess table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Response,
    Category,
    Timestamp,
}

impl Column {
    /// All columns, in storage order.
    pub const ALL: [Self; 3] = [Self::Response, Self::Category, Self::Timestamp];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Response => "response",
            Self::Category => "category",
            Self::Timestamp => "timestamp",
        }
    }

    /// Returns `true` for columns whose values can be treated as numbers.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Response | Self::Timestamp)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("column '{name}' not found (available: response, category, timestamp)")]
pub struct UnknownColumnError {
    #[error(not(source))]
    pub name: String,
}

impl FromStr for Column {
    type Err = UnknownColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownColumnError { name: s.to_owned() })
    }
}

/// The value of one cell.
///
/// All cells of a column share a variant, so values taken from a single
/// column are totally ordered in the natural way: integers numerically,
/// categories alphabetically, timestamps chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Category(Category),
    Timestamp(NaiveDateTime),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Category(c) => write!(f, "{c}"),
            Self::Timestamp(t) => write!(f, "{}", t.format(TIMESTAMP_FORMAT)),
        }
    }
}

impl Value {
    /// The column this kind of value belongs to.
    #[must_use]
    pub const fn column(self) -> Column {
        match self {
            Self::Integer(_) => Column::Response,
            Self::Category(_) => Column::Category,
            Self::Timestamp(_) => Column::Timestamp,
        }
    }

    /// Parses a cell of the given column from its textual form.
    #[must_use]
    pub fn parse(column: Column, s: &str) -> Option<Self> {
        match column {
            Column::Response => s.parse().ok().map(Self::Integer),
            Column::Category => s.parse().ok().map(Self::Category),
            Column::Timestamp => parse_timestamp(s).map(Self::Timestamp),
        }
    }
}

/// One observation: a single human guess.
///
/// Field names match the column names of the storage format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The guessed number.
    pub response: i64,
    pub category: Category,
    /// When the guess was recorded.
    #[serde(with = "timestamp_text")]
    pub timestamp: NaiveDateTime,
}

/// Serde adapter writing [`TIMESTAMP_FORMAT`] and reading either ISO-8601 form.
mod timestamp_text {
    use chrono::NaiveDateTime;
    use serde::{Deserialize as _, Deserializer, Serializer, de};

    use super::{TIMESTAMP_FORMAT, parse_timestamp};

    pub(super) fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_timestamp(&s).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{s}'")))
    }
}

impl Record {
    #[must_use]
    pub fn get(&self, column: Column) -> Value {
        match column {
            Column::Response => Value::Integer(self.response),
            Column::Category => Value::Category(self.category),
            Column::Timestamp => Value::Timestamp(self.timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_column_names_roundtrip() {
        for column in Column::ALL {
            assert_eq!(column.name().parse::<Column>().unwrap(), column);
        }
        let err = "Response".parse::<Column>().unwrap_err();
        assert_eq!(err.name, "Response");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("C".parse::<Category>().unwrap(), Category::C);
        assert!("E".parse::<Category>().is_err());
        assert!("a".parse::<Category>().is_err());
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 5, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-01-01 00:05:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T00:05:00"), Some(expected));
        assert_eq!(parse_timestamp("01/01/2024"), None);
    }

    #[test]
    fn test_value_display_and_order() {
        assert_eq!(Value::Integer(7).to_string(), "7");
        assert_eq!(Value::Category(Category::B).to_string(), "B");
        assert!(Value::Integer(2) < Value::Integer(10));
        assert!(Value::Category(Category::A) < Value::Category(Category::D));
    }

    #[test]
    fn test_record_timestamp_serde() {
        let record: Record = serde_json::from_str(
            r#"{"response": 4, "category": "D", "timestamp": "2024-01-01T00:05:00"}"#,
        )
        .unwrap();
        assert_eq!(record.category, Category::D);
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["timestamp"], "2024-01-01 00:05:00");
        assert!(
            serde_json::from_str::<Record>(
                r#"{"response": 4, "category": "D", "timestamp": "yesterday"}"#
            )
            .is_err()
        );
    }

    #[test]
    fn test_value_serializes_untagged() {
        assert_eq!(serde_json::to_string(&Value::Integer(5)).unwrap(), "5");
        assert_eq!(
            serde_json::to_string(&Value::Category(Category::A)).unwrap(),
            "\"A\""
        );
    }
}
