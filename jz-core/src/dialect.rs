//! Target library dialect.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The Zod API surface generated code is written against.
///
/// The two major versions differ in string formats, integer handling, error
/// customization and a handful of object methods, so every renderer branches
/// on this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Zod 3.x.
    V3,
    /// Zod 4.x.
    #[default]
    V4,
}

impl Dialect {
    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::V3 => "v3",
            Dialect::V4 => "v4",
        }
    }

    /// Module specifier the host import is taken from.
    pub fn module(&self) -> &'static str {
        match self {
            Dialect::V3 => "zod",
            Dialect::V4 => "zod/v4",
        }
    }

    pub fn is_v4(&self) -> bool {
        matches!(self, Dialect::V4)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v3" | "3" => Ok(Dialect::V3),
            "v4" | "4" => Ok(Dialect::V4),
            other => Err(format!("unknown dialect '{}', expected 'v3' or 'v4'", other)),
        }
    }
}
