use jsonzod_core::SchemaPath;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for compilation (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("conflicting options: {message}")]
    #[diagnostic(code(jz::config_conflict))]
    ConfigConflict {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("document '{id}' is already registered")]
    #[diagnostic(
        code(jz::duplicate_document),
        help("use `update` to replace an existing document")
    )]
    DuplicateDocument { id: String },

    #[error("document '{id}' is not registered")]
    #[diagnostic(code(jz::unknown_document))]
    UnknownDocument { id: String },

    #[error("cannot resolve reference '{reference}' at {path}")]
    #[diagnostic(
        code(jz::unresolvable_reference),
        help("references take the form `<document>#<pointer>`; named exports live under `/$defs/<name>`")
    )]
    UnresolvableReference { reference: String, path: SchemaPath },

    #[error("malformed `{keyword}` at {path}: {reason}")]
    #[diagnostic(code(jz::malformed_composition))]
    MalformedComposition {
        keyword: String,
        reason: String,
        path: SchemaPath,
    },

    #[error("cannot register compiler for '{discriminator}': {reason}")]
    #[diagnostic(code(jz::invalid_compiler))]
    InvalidCompiler {
        discriminator: String,
        reason: String,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] jsonzod_schema::Error),
}

impl Error {
    pub fn config_conflict(message: impl Into<String>) -> Box<Self> {
        Box::new(Error::ConfigConflict {
            message: message.into(),
            help: None,
        })
    }

    pub fn unresolvable(reference: impl Into<String>, path: &SchemaPath) -> Box<Self> {
        Box::new(Error::UnresolvableReference {
            reference: reference.into(),
            path: path.clone(),
        })
    }

    pub fn malformed(
        keyword: impl Into<String>,
        reason: impl Into<String>,
        path: &SchemaPath,
    ) -> Box<Self> {
        Box::new(Error::MalformedComposition {
            keyword: keyword.into(),
            reason: reason.into(),
            path: path.clone(),
        })
    }
}

impl From<Box<jsonzod_schema::Error>> for Box<Error> {
    fn from(err: Box<jsonzod_schema::Error>) -> Self {
        Box::new(Error::Schema(*err))
    }
}
