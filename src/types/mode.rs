use serde::{Deserialize, Serialize};

use super::Error;

/// How an insert treats rows already present in the target table.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Copy, Clone)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Existing rows are preserved; the dataset is written after them.
    Append,
    /// The table contents are fully replaced by the dataset.
    Replace,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Append => write!(f, "append"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "append" => Ok(Self::Append),
            "replace" => Ok(Self::Replace),
            _ => Err(Error::UnknownMode(value.to_owned())),
        }
    }
}
