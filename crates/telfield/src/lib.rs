#![forbid(unsafe_code)]

//! Telfield public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports the field controller, country rules, and submission guard from
//! the internal crates and offers a lightweight prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use telfield_core::digits::{strip_non_digits, strip_plus, strip_whitespace};
pub use telfield_core::field::PhoneField;
pub use telfield_core::rule::{
    CompiledRule, CountryRule, FieldConfig, Messages, PrefixRewrite, RuleError,
};
pub use telfield_core::validity::{
    NOTICE_CODE_ENTER_VALID, NOTICE_CODE_INVALID_FORMAT, NOTICE_CODE_WRONG_PREFIX, Notice,
    StateClasses, Validity, classes_for, evaluate,
};

// --- Guard re-exports ------------------------------------------------------

pub use telfield_guard::{FieldMeta, GuardConfig, InputMode, SubmissionGuard};

// --- Widget re-exports -----------------------------------------------------

#[cfg(feature = "widgets")]
pub use telfield_widgets::{PhoneInput, PhoneInputState};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for telfield apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while loading rule files or driving the terminal.
    Io(std::io::Error),
    /// A country rule that cannot be compiled.
    Rule(RuleError),
    /// Invalid application configuration with message.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Rule(err) => write!(f, "{err}"),
            Self::Config(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Rule(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<RuleError> for Error {
    fn from(err: RuleError) -> Self {
        Self::Rule(err)
    }
}

/// Standard result type for telfield APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CountryRule, Error, FieldMeta, Messages, Notice, PhoneField, Result, StateClasses,
        SubmissionGuard, Validity,
    };

    #[cfg(feature = "widgets")]
    pub use crate::{PhoneInput, PhoneInputState};

    pub use crate::{core, guard};

    #[cfg(feature = "widgets")]
    pub use crate::widgets;
}

pub use telfield_core as core;
pub use telfield_guard as guard;
#[cfg(feature = "widgets")]
pub use telfield_widgets as widgets;
