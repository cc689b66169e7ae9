//! Compilation options.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Dialect;

/// How a compiled expression is wrapped into module text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// The bare validator expression, or `const name = ...` when named.
    None,
    /// `module.exports = ...`.
    Cjs,
    /// `export default ...` or `export const name = ...`.
    #[default]
    Esm,
    /// `const name = ...` (a name is required).
    Const,
}

impl WrapMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WrapMode::None => "none",
            WrapMode::Cjs => "cjs",
            WrapMode::Esm => "esm",
            WrapMode::Const => "const",
        }
    }
}

impl fmt::Display for WrapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WrapMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(WrapMode::None),
            "cjs" => Ok(WrapMode::Cjs),
            "esm" => Ok(WrapMode::Esm),
            "const" => Ok(WrapMode::Const),
            other => Err(format!(
                "unknown wrap mode '{}', expected one of: none, cjs, esm, const",
                other
            )),
        }
    }
}

/// Options recognized by the compiler and the file emitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Target Zod major version.
    pub dialect: Dialect,
    /// Output wrapping mode.
    pub wrap: WrapMode,
    /// Name of the emitted constant (single-document mode).
    pub name: Option<String>,
    /// Emit the `import { z } from "zod"` statement.
    pub with_import: bool,
    /// Append `export type <alias> = z.infer<typeof name>`.
    pub type_alias: Option<String>,
    /// Apply `default` keywords as `.default(...)`.
    pub apply_defaults: bool,
    /// Emit descriptions as JSDoc comments on object members.
    pub jsdocs: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            wrap: WrapMode::default(),
            name: None,
            with_import: true,
            type_alias: None,
            apply_defaults: true,
            jsdocs: false,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn type_alias(mut self, alias: impl Into<String>) -> Self {
        self.type_alias = Some(alias.into());
        self
    }

    pub fn without_import(mut self) -> Self {
        self.with_import = false;
        self
    }

    pub fn without_defaults(mut self) -> Self {
        self.apply_defaults = false;
        self
    }

    pub fn with_jsdocs(mut self) -> Self {
        self.jsdocs = true;
        self
    }
}
