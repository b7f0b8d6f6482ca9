//! Log level definitions
//!
//! Ranks are 0-indexed by declaration order; a lower rank is more severe.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The canonical six levels, one constant per name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LogLevel {
    Fatal = 0,
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    #[inline]
    pub const fn rank(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "fatal",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn from_rank(rank: usize) -> Option<Self> {
        Self::ALL.get(rank).copied()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fatal" => Ok(LogLevel::Fatal),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggerError::unknown_level(s)),
        }
    }
}

/// Ordered list of level names, most severe first
///
/// Exactly one table is active per logger. The rank of a level is its index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct LevelTable {
    names: Vec<String>,
}

impl LevelTable {
    /// Build a custom table; names must be unique and the list non-empty
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(LoggerError::config("LevelTable", "level list is empty"));
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(LoggerError::config(
                    "LevelTable",
                    format!("duplicate level '{}'", name),
                ));
            }
        }
        Ok(Self { names })
    }

    /// Rank of `name`, or `None` when the table does not declare it
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn name_of(&self, rank: usize) -> Option<&str> {
        self.names.get(rank).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Resolve a rank-or-name reference against this table
    pub fn resolve(&self, level: &LevelRef) -> Option<usize> {
        match level {
            LevelRef::Rank(rank) => Some(*rank),
            LevelRef::Name(name) => self.rank_of(name),
        }
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            names: LogLevel::ALL.iter().map(|l| l.as_str().to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for LevelTable {
    type Error = LoggerError;

    fn try_from(names: Vec<String>) -> Result<Self> {
        LevelTable::new(names)
    }
}

impl From<LevelTable> for Vec<String> {
    fn from(table: LevelTable) -> Self {
        table.names
    }
}

/// A level given either by rank or by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelRef {
    Rank(usize),
    Name(String),
}

impl From<usize> for LevelRef {
    fn from(rank: usize) -> Self {
        LevelRef::Rank(rank)
    }
}

impl From<&str> for LevelRef {
    fn from(name: &str) -> Self {
        LevelRef::Name(name.to_string())
    }
}

impl From<String> for LevelRef {
    fn from(name: String) -> Self {
        LevelRef::Name(name)
    }
}

impl From<LogLevel> for LevelRef {
    fn from(level: LogLevel) -> Self {
        LevelRef::Rank(level.rank())
    }
}

impl Default for LevelRef {
    fn default() -> Self {
        LevelRef::Rank(LogLevel::Info.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_ranks() {
        assert_eq!(LogLevel::Fatal.rank(), 0);
        assert_eq!(LogLevel::Warn.rank(), 2);
        assert_eq!(LogLevel::Trace.rank(), 5);
        assert!(LogLevel::Fatal < LogLevel::Trace);
    }

    #[test]
    fn test_default_table_matches_constants() {
        let table = LevelTable::default();
        assert_eq!(table.len(), 6);
        for level in LogLevel::ALL {
            assert_eq!(table.rank_of(level.as_str()), Some(level.rank()));
            assert_eq!(table.name_of(level.rank()), Some(level.as_str()));
        }
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_custom_table() {
        let table = LevelTable::new(["emerg", "alert", "notice"]).unwrap();
        assert_eq!(table.rank_of("notice"), Some(2));
        assert_eq!(table.rank_of("info"), None);
        assert_eq!(table.resolve(&LevelRef::from("alert")), Some(1));
        assert_eq!(table.resolve(&LevelRef::from(7)), Some(7));
    }

    #[test]
    fn test_invalid_tables_rejected() {
        assert!(LevelTable::new(Vec::<String>::new()).is_err());
        assert!(LevelTable::new(["a", "b", "a"]).is_err());
    }

    #[test]
    fn test_level_ref_deserialize() {
        let r: LevelRef = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(r, LevelRef::Name("warn".to_string()));
        let r: LevelRef = serde_json::from_str("4").unwrap();
        assert_eq!(r, LevelRef::Rank(4));
    }
}
