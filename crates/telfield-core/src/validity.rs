#![forbid(unsafe_code)]

//! Validation outcomes and presentation state.
//!
//! Validation is recomputed from scratch on every event: strip whitespace,
//! test the anchored country pattern, and only surface a failure once the
//! user has typed enough to plausibly be done (or has left the field).
//! [`StateClasses`] mirrors the outcome as flags the widget layer styles
//! from, replacing the CSS class contract of web checkouts.

use std::fmt;

use bitflags::bitflags;

use crate::digits;
use crate::rule::{CompiledRule, CountryRule};

// ---------------------------------------------------------------------------
// Notice codes
// ---------------------------------------------------------------------------

/// Notice code: prefix present, wrong digit after it (or wrong length at
/// the submission guard).
pub const NOTICE_CODE_WRONG_PREFIX: &str = "wrong_prefix";
/// Notice code: prefix present, rest of the number malformed.
pub const NOTICE_CODE_INVALID_FORMAT: &str = "invalid_format";
/// Notice code: generic fallback naming the expected format.
pub const NOTICE_CODE_ENTER_VALID: &str = "enter_valid";

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// A surfaced validation failure: stable code plus localized text.
///
/// The `code` identifies which rule message was selected; the `message` is
/// the deployment's localized text, shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Stable identifier for programmatic handling.
    pub code: &'static str,
    /// Localized message text.
    pub message: String,
}

impl Notice {
    /// Create a new notice with the given code and message.
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Notice {}

// ---------------------------------------------------------------------------
// Validity
// ---------------------------------------------------------------------------

/// Tri-state outcome of validating the field value.
///
/// `Neutral` holds while the input is too short to judge or while failures
/// are suppressed during typing; it is the initial state and the state a
/// focused field returns to after a surfaced error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Validity {
    /// The value matches the country pattern.
    Valid,
    /// A failure surfaced with a localized notice.
    Invalid(Notice),
    /// No judgement yet.
    #[default]
    Neutral,
}

impl Validity {
    /// Returns `true` if the value matched the pattern.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns `true` if a failure is surfaced.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Returns `true` if no judgement is presented.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        matches!(self, Self::Neutral)
    }

    /// The surfaced notice, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Self::Invalid(notice) => Some(notice),
            _ => None,
        }
    }

    /// The surfaced message text, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.notice().map(|n| n.message.as_str())
    }
}

// ---------------------------------------------------------------------------
// StateClasses
// ---------------------------------------------------------------------------

bitflags! {
    /// Presentation flags mirrored onto the field and its wrapper.
    ///
    /// `VALID`/`INVALID` style the field text; `HAS_VALID`/`HAS_INVALID`
    /// style the wrapper; `HAS_ICON` shows the trailing status glyph.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StateClasses: u8 {
        const VALID = 1 << 0;
        const INVALID = 1 << 1;
        const HAS_VALID = 1 << 2;
        const HAS_INVALID = 1 << 3;
        const HAS_ICON = 1 << 4;
    }
}

impl StateClasses {
    /// Flags presented for a value that passes validation.
    pub const VALID_SET: Self = Self::VALID.union(Self::HAS_VALID).union(Self::HAS_ICON);
    /// Flags presented for a surfaced failure.
    pub const INVALID_SET: Self = Self::INVALID.union(Self::HAS_INVALID).union(Self::HAS_ICON);
}

impl fmt::Display for StateClasses {
    /// Render as a space-separated class list (`"valid has-valid has-icon"`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, class) in [
            ("valid", Self::VALID),
            ("invalid", Self::INVALID),
            ("has-valid", Self::HAS_VALID),
            ("has-invalid", Self::HAS_INVALID),
            ("has-icon", Self::HAS_ICON),
        ] {
            if self.contains(class) {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// The presentation flags for a validation outcome.
#[must_use]
pub fn classes_for(validity: &Validity) -> StateClasses {
    match validity {
        Validity::Valid => StateClasses::VALID_SET,
        Validity::Invalid(_) => StateClasses::INVALID_SET,
        Validity::Neutral => StateClasses::empty(),
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Validate `value` against `rule`.
///
/// `surface` controls whether failures may produce [`Validity::Invalid`];
/// silent runs (every keystroke) only ever yield `Valid` or `Neutral`.
/// Even when surfacing, a failure stays `Neutral` until the
/// whitespace-stripped value reaches the rule's minimum significant length,
/// so leaving a half-typed field does not scold the user.
#[must_use]
pub fn evaluate(rule: &CompiledRule, value: &str, surface: bool) -> Validity {
    let stripped = digits::strip_whitespace(value);
    if rule.is_match(&stripped) {
        return Validity::Valid;
    }
    if !surface || stripped.chars().count() < rule.rule().min_significant {
        return Validity::Neutral;
    }
    Validity::Invalid(select_notice(rule.rule(), &stripped))
}

/// Pick the most specific message for a failed, surfaced validation.
///
/// Targeted messages need at least one character after the prefix; a value
/// that is only the prefix gets the generic message.
fn select_notice(rule: &CountryRule, stripped: &str) -> Notice {
    if !rule.prefix.is_empty() && stripped.starts_with(&rule.prefix) {
        if let Some(following) = stripped.chars().nth(rule.prefix.chars().count()) {
            if rule
                .significant_digit
                .is_some_and(|expected| following != expected)
            {
                return Notice::new(NOTICE_CODE_WRONG_PREFIX, rule.messages.wrong_prefix.clone());
            }
            return Notice::new(
                NOTICE_CODE_INVALID_FORMAT,
                rule.messages.invalid_format.clone(),
            );
        }
    }
    Notice::new(NOTICE_CODE_ENTER_VALID, rule.messages.enter_valid.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::CountryRule;

    fn lithuania() -> CompiledRule {
        CompiledRule::new(CountryRule::lithuania()).unwrap()
    }

    fn romania() -> CompiledRule {
        CompiledRule::new(CountryRule::romania()).unwrap()
    }

    #[test]
    fn valid_number_is_valid_even_silent() {
        let rule = lithuania();
        assert!(evaluate(&rule, "+37061234567", false).is_valid());
        assert!(evaluate(&rule, "+37061234567", true).is_valid());
    }

    #[test]
    fn whitespace_is_ignored() {
        let rule = lithuania();
        assert!(evaluate(&rule, "+370 612 34567", false).is_valid());
        assert!(evaluate(&rule, " +37061234567 ", true).is_valid());
    }

    #[test]
    fn silent_failure_stays_neutral() {
        let rule = lithuania();
        assert!(evaluate(&rule, "+37081234567", false).is_neutral());
    }

    #[test]
    fn short_input_stays_neutral_even_surfaced() {
        let rule = lithuania();
        assert!(evaluate(&rule, "+3706", true).is_neutral());
        assert!(evaluate(&rule, "", true).is_neutral());
    }

    #[test]
    fn wrong_significant_digit_selects_targeted_message() {
        let rule = lithuania();
        let validity = evaluate(&rule, "+37081234567", true);
        let notice = validity.notice().unwrap();
        assert_eq!(notice.code, NOTICE_CODE_WRONG_PREFIX);
        assert!(notice.message.contains("+3706"));
    }

    #[test]
    fn malformed_rest_selects_invalid_format() {
        let rule = lithuania();
        // Right prefix and significant digit, letter in the middle.
        let validity = evaluate(&rule, "+37061234a67", true);
        let notice = validity.notice().unwrap();
        assert_eq!(notice.code, NOTICE_CODE_INVALID_FORMAT);
    }

    #[test]
    fn missing_prefix_selects_generic_message() {
        let rule = lithuania();
        let validity = evaluate(&rule, "861234567890", true);
        let notice = validity.notice().unwrap();
        assert_eq!(notice.code, NOTICE_CODE_ENTER_VALID);
    }

    #[test]
    fn bare_prefix_selects_generic_message() {
        // A rule surfacing early enough to judge a bare prefix: the
        // targeted message needs a digit after the prefix to point at.
        let mut rule = CountryRule::lithuania();
        rule.min_significant = 4;
        let rule = CompiledRule::new(rule).unwrap();

        let validity = evaluate(&rule, "+370", true);
        assert_eq!(validity.notice().unwrap().code, NOTICE_CODE_ENTER_VALID);

        let validity = evaluate(&rule, "+3708", true);
        assert_eq!(validity.notice().unwrap().code, NOTICE_CODE_WRONG_PREFIX);
    }

    #[test]
    fn romania_has_no_targeted_digit_message() {
        let rule = romania();
        // Starts with 07, long enough, malformed rest.
        let validity = evaluate(&rule, "07123a5678", true);
        let notice = validity.notice().unwrap();
        assert_eq!(notice.code, NOTICE_CODE_INVALID_FORMAT);
    }

    #[test]
    fn classes_track_validity() {
        assert_eq!(classes_for(&Validity::Valid), StateClasses::VALID_SET);
        assert_eq!(
            classes_for(&Validity::Invalid(Notice::new(
                NOTICE_CODE_ENTER_VALID,
                "nope"
            ))),
            StateClasses::INVALID_SET
        );
        assert_eq!(classes_for(&Validity::Neutral), StateClasses::empty());
    }

    #[test]
    fn class_list_display() {
        assert_eq!(
            StateClasses::VALID_SET.to_string(),
            "valid has-valid has-icon"
        );
        assert_eq!(
            StateClasses::INVALID_SET.to_string(),
            "invalid has-invalid has-icon"
        );
        assert_eq!(StateClasses::empty().to_string(), "");
    }

    #[test]
    fn notice_display_is_message() {
        let notice = Notice::new(NOTICE_CODE_ENTER_VALID, "enter a valid number");
        assert_eq!(notice.to_string(), "enter a valid number");
    }

    #[test]
    fn default_validity_is_neutral() {
        assert!(Validity::default().is_neutral());
    }
}
