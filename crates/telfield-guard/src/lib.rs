#![forbid(unsafe_code)]

//! Submission-side re-validation.
//!
//! The interactive field is advisory: anything running on the client can be
//! bypassed, so the posted value is re-checked here before the order goes
//! through. [`SubmissionGuard`] strips everything that is not a digit and
//! requires one of the allowed prefixes together with the exact expected
//! digit count. On failure it yields one localized [`Notice`] for the
//! checkout page; on success it stays silent.
//!
//! The guard also owns the outgoing [`FieldMeta`] of the phone field, so
//! the rendered element carries the matching hard length cap and virtual
//! keyboard hint.

use telfield_core::{
    CountryRule, Messages, NOTICE_CODE_ENTER_VALID, NOTICE_CODE_WRONG_PREFIX, Notice,
    strip_non_digits,
};

// ---------------------------------------------------------------------------
// GuardConfig
// ---------------------------------------------------------------------------

/// Deployment knobs for the submission guard.
///
/// Prefixes are normalized to their digits on construction, so `+370` and
/// `370` describe the same allowed prefix; empty entries are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    allowed_prefixes: Vec<String>,
    expected_digits: usize,
    max_length: usize,
    messages: Messages,
}

impl GuardConfig {
    /// Build a config from raw deployment values.
    pub fn new<I, P>(prefixes: I, expected_digits: usize, max_length: usize, messages: Messages) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let allowed_prefixes = prefixes
            .into_iter()
            .map(|p| strip_non_digits(p.as_ref()))
            .filter(|p| !p.is_empty())
            .collect();
        Self {
            allowed_prefixes,
            expected_digits,
            max_length,
            messages,
        }
    }

    /// Derive the guard from the same rule record that drives the field.
    ///
    /// The expected digit count is the field length minus the prefix
    /// characters that are not digits (the `+`), matching how the posted
    /// value is normalized before the check.
    #[must_use]
    pub fn from_rule(rule: &CountryRule) -> Self {
        let prefix_extras = rule.prefix.chars().filter(|c| !c.is_ascii_digit()).count();
        Self::new(
            [rule.prefix.as_str()],
            rule.max_length.saturating_sub(prefix_extras),
            rule.max_length,
            rule.messages.clone(),
        )
    }

    /// Whether the guard has anything to enforce.
    ///
    /// With no usable prefixes or a zero expected length the guard passes
    /// every submission through unchanged.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.allowed_prefixes.is_empty() && self.expected_digits > 0
    }

    /// The digit-normalized allowed prefixes.
    #[must_use]
    pub fn allowed_prefixes(&self) -> &[String] {
        &self.allowed_prefixes
    }

    /// Exact digit count a submission must have.
    #[must_use]
    pub fn expected_digits(&self) -> usize {
        self.expected_digits
    }
}

// ---------------------------------------------------------------------------
// FieldMeta
// ---------------------------------------------------------------------------

/// Virtual keyboard hint mirrored onto the raw field element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Telephone keypad.
    Tel,
    /// Digit keypad.
    Numeric,
    /// Plain text keyboard.
    Text,
}

impl InputMode {
    /// The attribute value embedders write out.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tel => "tel",
            Self::Numeric => "numeric",
            Self::Text => "text",
        }
    }
}

/// Outgoing metadata of the checkout phone field.
///
/// [`SubmissionGuard::apply`] only sets the knobs the guard owns; `None`
/// fields are left for the embedder to fill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMeta {
    /// Hard length cap written to the element.
    pub max_length: Option<usize>,
    /// Virtual keyboard hint.
    pub input_mode: Option<InputMode>,
}

// ---------------------------------------------------------------------------
// SubmissionGuard
// ---------------------------------------------------------------------------

/// The authoritative check on one posted phone number.
#[derive(Debug, Clone)]
pub struct SubmissionGuard {
    config: GuardConfig,
}

impl SubmissionGuard {
    /// Create a guard from an explicit config.
    #[must_use]
    pub fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    /// Guard for the same rule record that drives the interactive field.
    #[must_use]
    pub fn for_rule(rule: &CountryRule) -> Self {
        Self::new(GuardConfig::from_rule(rule))
    }

    /// The active config.
    #[must_use]
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Check one posted value.
    ///
    /// A disabled guard accepts everything. Otherwise the submission passes
    /// when its digits start with an allowed prefix and count exactly
    /// [`GuardConfig::expected_digits`]; anything else is rejected with one
    /// localized notice.
    pub fn check(&self, raw: &str) -> Result<(), Notice> {
        if !self.config.is_enabled() {
            return Ok(());
        }
        let digits = strip_non_digits(raw);
        let accepted = self
            .config
            .allowed_prefixes
            .iter()
            .any(|prefix| digits.starts_with(prefix.as_str()))
            && digits.len() == self.config.expected_digits;
        if accepted {
            tracing::debug!(digits = %digits, "submission accepted");
            return Ok(());
        }
        let notice = self.rejection_notice(&digits);
        tracing::debug!(digits = %digits, code = notice.code, "submission rejected");
        Err(notice)
    }

    /// Stamp the guard's knobs onto the outgoing field metadata.
    pub fn apply(&self, meta: &mut FieldMeta) {
        meta.max_length = Some(self.config.max_length);
        meta.input_mode = Some(InputMode::Tel);
    }

    /// The right prefix with the wrong digit count gets the targeted
    /// message; everything else gets the generic one.
    fn rejection_notice(&self, digits: &str) -> Notice {
        let has_prefix = self
            .config
            .allowed_prefixes
            .iter()
            .any(|prefix| digits.starts_with(prefix.as_str()));
        if has_prefix {
            Notice::new(
                NOTICE_CODE_WRONG_PREFIX,
                self.config.messages.wrong_prefix.clone(),
            )
        } else {
            Notice::new(
                NOTICE_CODE_ENTER_VALID,
                self.config.messages.enter_valid.clone(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn romanian_guard() -> SubmissionGuard {
        SubmissionGuard::for_rule(&CountryRule::romania())
    }

    fn lithuanian_guard() -> SubmissionGuard {
        SubmissionGuard::for_rule(&CountryRule::lithuania())
    }

    #[test]
    fn accepts_exact_romanian_number() {
        assert!(romanian_guard().check("0712345678").is_ok());
    }

    #[test]
    fn formatting_characters_are_ignored() {
        let guard = romanian_guard();
        assert!(guard.check("07 12-34-56-78").is_ok());
        assert!(guard.check("+07.12.34.56.78").is_ok());
    }

    #[test]
    fn wrong_length_with_right_prefix_gets_targeted_notice() {
        let err = romanian_guard().check("071234567").unwrap_err();
        assert_eq!(err.code, NOTICE_CODE_WRONG_PREFIX);
        assert!(err.message.contains("07"));
    }

    #[test]
    fn missing_prefix_gets_generic_notice() {
        let err = romanian_guard().check("0612345678").unwrap_err();
        assert_eq!(err.code, NOTICE_CODE_ENTER_VALID);
    }

    #[test]
    fn empty_submission_gets_generic_notice() {
        let err = romanian_guard().check("").unwrap_err();
        assert_eq!(err.code, NOTICE_CODE_ENTER_VALID);
    }

    #[test]
    fn plus_prefix_rule_counts_digits_only() {
        let guard = lithuanian_guard();
        assert_eq!(guard.config().expected_digits(), 11);
        assert_eq!(guard.config().allowed_prefixes(), ["370"]);
        assert!(guard.check("+370 612 34567").is_ok());
        assert!(guard.check("37061234567").is_ok());
    }

    #[test]
    fn lithuanian_short_number_gets_targeted_notice() {
        let err = lithuanian_guard().check("+3706123456").unwrap_err();
        assert_eq!(err.code, NOTICE_CODE_WRONG_PREFIX);
    }

    #[test]
    fn multiple_prefixes_all_accepted() {
        let messages = CountryRule::romania().messages;
        let config = GuardConfig::new(["0901", "0902", "0903"], 10, 10, messages);
        let guard = SubmissionGuard::new(config);
        assert!(guard.check("0901123456").is_ok());
        assert!(guard.check("0902123456").is_ok());
        assert!(guard.check("0904123456").is_err());
    }

    #[test]
    fn guard_without_prefixes_is_disabled() {
        let messages = CountryRule::romania().messages;
        let config = GuardConfig::new(Vec::<&str>::new(), 10, 10, messages);
        assert!(!config.is_enabled());
        assert!(SubmissionGuard::new(config).check("anything").is_ok());
    }

    #[test]
    fn guard_with_zero_length_is_disabled() {
        let messages = CountryRule::romania().messages;
        let config = GuardConfig::new(["07"], 0, 10, messages);
        assert!(!config.is_enabled());
        assert!(SubmissionGuard::new(config).check("0712345678").is_ok());
    }

    #[test]
    fn apply_stamps_field_metadata() {
        let mut meta = FieldMeta::default();
        romanian_guard().apply(&mut meta);
        assert_eq!(meta.max_length, Some(10));
        assert_eq!(meta.input_mode, Some(InputMode::Tel));
        assert_eq!(meta.input_mode.unwrap().as_str(), "tel");
    }
}
