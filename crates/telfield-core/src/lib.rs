#![forbid(unsafe_code)]

//! Phone field validation for checkout forms.
//!
//! This crate provides the input-side half of phone number validation:
//! - [`CountryRule`] - one country's prefix, pattern, lengths, and messages
//! - [`PhoneField`] - the field controller: edits, caret, normalization
//! - [`Validity`] - tri-state outcome carrying a localized [`Notice`]
//! - [`StateClasses`] - presentation flags derived from the outcome
//!
//! Every edit runs the same pipeline: the country's auto-correction, prefix
//! re-assertion, truncation to the maximum length, then a silent validation
//! pass. Errors are only surfaced when the field loses focus.
//!
//! # Example
//! ```
//! use telfield_core::{CountryRule, PhoneField};
//!
//! let mut field = PhoneField::new(CountryRule::lithuania()).unwrap();
//! assert_eq!(field.value(), "+370");
//!
//! // The trunk "8" is rewritten away once a mobile digit follows it.
//! field.insert('8');
//! field.insert('6');
//! assert_eq!(field.value(), "+3706");
//!
//! for c in "1234567".chars() {
//!     field.insert(c);
//! }
//! assert_eq!(field.value(), "+37061234567");
//! assert!(field.validity().is_valid());
//! ```

pub mod digits;
pub mod field;
pub mod rule;
pub mod validity;

pub use digits::{strip_non_digits, strip_plus, strip_whitespace};
pub use field::PhoneField;
pub use rule::{CompiledRule, CountryRule, FieldConfig, Messages, PrefixRewrite, RuleError};
pub use validity::{
    NOTICE_CODE_ENTER_VALID, NOTICE_CODE_INVALID_FORMAT, NOTICE_CODE_WRONG_PREFIX, Notice,
    StateClasses, Validity, classes_for, evaluate,
};
