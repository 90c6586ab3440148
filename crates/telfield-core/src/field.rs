#![forbid(unsafe_code)]

//! Phone field controller.
//!
//! [`PhoneField`] owns the live value and caret of one checkout phone input
//! and runs the same pipeline after every edit: country auto-correction,
//! prefix re-assertion, truncation to the maximum length, then a silent
//! validation pass. Failures are only surfaced on [`PhoneField::blur`];
//! focusing again clears them so the user can re-attempt without a stale
//! error. Grapheme-cluster aware for correct Unicode handling.

use unicode_segmentation::UnicodeSegmentation;

use crate::rule::{CompiledRule, CountryRule, FieldConfig, RuleError};
use crate::validity::{StateClasses, Validity, classes_for, evaluate};

/// A single-line phone input bound to one country rule.
#[derive(Debug, Clone)]
pub struct PhoneField {
    rule: CompiledRule,
    /// Text value.
    value: String,
    /// Caret position (grapheme index).
    caret: usize,
    /// Latest validation outcome.
    validity: Validity,
    /// Presentation flags derived from the outcome.
    classes: StateClasses,
    /// Whether the field currently has focus.
    focused: bool,
}

impl PhoneField {
    /// Create a field for `rule`, seeding the value with the rule's prefix.
    ///
    /// The seeded field starts neutral with the caret after the prefix; no
    /// validation runs until the first edit or blur.
    pub fn new(rule: CountryRule) -> Result<Self, RuleError> {
        let rule = CompiledRule::new(rule)?;
        let value = rule.rule().prefix.clone();
        let caret = value.graphemes(true).count();
        Ok(Self {
            rule,
            value,
            caret,
            validity: Validity::Neutral,
            classes: StateClasses::empty(),
            focused: false,
        })
    }

    // --- Value access ---

    /// Get the current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the caret position (grapheme index).
    #[must_use]
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Latest validation outcome.
    #[must_use]
    pub fn validity(&self) -> &Validity {
        &self.validity
    }

    /// Presentation flags for the field and its wrapper.
    #[must_use]
    pub fn classes(&self) -> StateClasses {
        self.classes
    }

    /// The surfaced error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.validity.message()
    }

    /// The country rule this field enforces.
    #[must_use]
    pub fn rule(&self) -> &CountryRule {
        self.rule.rule()
    }

    /// The field knobs derived from the rule.
    #[must_use]
    pub fn config(&self) -> FieldConfig {
        self.rule.rule().field_config()
    }

    /// Whether the field currently has focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Replace the whole value (paste-over, autofill), then normalize.
    ///
    /// Clearing the field this way re-seeds the prefix.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.caret = self.grapheme_count();
        self.after_edit();
    }

    // --- Editing operations ---

    /// Insert one character at the caret.
    pub fn insert(&mut self, c: char) {
        let byte = self.grapheme_byte_offset(self.caret);
        self.value.insert(byte, c);
        self.caret += 1;
        self.after_edit();
    }

    /// Insert a string at the caret (paste path).
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let byte = self.grapheme_byte_offset(self.caret);
        self.value.insert_str(byte, s);
        self.caret += s.graphemes(true).count();
        self.after_edit();
    }

    /// Delete the grapheme before the caret.
    ///
    /// Returns `false` without changing anything while the caret sits at or
    /// before the end of the prefix region; the prefix cannot be deleted
    /// from the keyboard.
    pub fn delete_back(&mut self) -> bool {
        if self.caret <= self.rule.prefix_len() {
            return false;
        }
        let byte_start = self.grapheme_byte_offset(self.caret - 1);
        let byte_end = self.grapheme_byte_offset(self.caret);
        self.value.drain(byte_start..byte_end);
        self.caret -= 1;
        self.after_edit();
        true
    }

    /// Delete the grapheme after the caret.
    ///
    /// Blocked in the same caret region as [`PhoneField::delete_back`]:
    /// both deletion keys are inert until the caret moves past the prefix.
    pub fn delete_forward(&mut self) -> bool {
        if self.caret <= self.rule.prefix_len() {
            return false;
        }
        if self.caret >= self.grapheme_count() {
            return false;
        }
        let byte_start = self.grapheme_byte_offset(self.caret);
        let byte_end = self.grapheme_byte_offset(self.caret + 1);
        self.value.drain(byte_start..byte_end);
        self.after_edit();
        true
    }

    // --- Caret movement ---

    /// Move the caret one grapheme left.
    pub fn move_left(&mut self) {
        if self.caret > 0 {
            self.caret -= 1;
        }
    }

    /// Move the caret one grapheme right.
    pub fn move_right(&mut self) {
        if self.caret < self.grapheme_count() {
            self.caret += 1;
        }
    }

    /// Move the caret to the start of the value.
    pub fn move_home(&mut self) {
        self.caret = 0;
    }

    /// Move the caret past the last grapheme.
    pub fn move_end(&mut self) {
        self.caret = self.grapheme_count();
    }

    // --- Focus transitions ---

    /// The field lost focus: re-run validation, surfacing failures.
    pub fn blur(&mut self) {
        self.focused = false;
        self.validity = evaluate(&self.rule, &self.value, true);
        self.classes = classes_for(&self.validity);
    }

    /// The field gained focus.
    ///
    /// A surfaced error is cleared back to neutral presentation; a valid
    /// presentation is kept.
    pub fn focus(&mut self) {
        self.focused = true;
        if self.validity.is_invalid() {
            self.validity = Validity::Neutral;
            self.classes = StateClasses::empty();
        }
    }

    // --- Input pipeline ---

    /// Normalize after an edit: auto-correction, prefix re-assertion,
    /// truncation, then silent validation.
    fn after_edit(&mut self) {
        self.apply_rewrite();
        self.assert_prefix();
        self.truncate();
        self.caret = self.caret.min(self.grapheme_count());
        self.validity = evaluate(&self.rule, &self.value, false);
        self.classes = classes_for(&self.validity);
    }

    /// Apply the rule's auto-correction to the national part.
    ///
    /// The caret moves back by the number of graphemes removed, clamped to
    /// the prefix boundary.
    fn apply_rewrite(&mut self) {
        let Some(rewrite) = self.rule.rule().rewrite.clone() else {
            return;
        };
        let prefix = self.rule.rule().prefix.clone();
        let Some(national) = self.value.strip_prefix(prefix.as_str()) else {
            return;
        };
        let Some(rest) = national.strip_prefix(rewrite.strip.as_str()) else {
            return;
        };
        let trimmed = rest.trim_start();
        if !trimmed.starts_with(rewrite.before) {
            return;
        }
        let removed_bytes = rewrite.strip.len() + (rest.len() - trimmed.len());
        let removed = self.value[prefix.len()..prefix.len() + removed_bytes]
            .graphemes(true)
            .count();
        let next = format!("{prefix}{trimmed}");
        self.value = next;
        let boundary = self.rule.prefix_len();
        self.caret = self
            .caret
            .saturating_sub(removed)
            .clamp(boundary, self.grapheme_count());
    }

    /// Restore the prefix when an edit stripped or altered it.
    ///
    /// Checked against both forms: if the value is the bare-digit form of a
    /// prefixed number, the prefix spelling is restored (a stray `+` ahead
    /// of a national-format prefix is dropped); otherwise the whole prefix
    /// is prepended. The caret lands at the end of the value.
    fn assert_prefix(&mut self) {
        let prefix = self.rule.rule().prefix.clone();
        if prefix.is_empty() || self.value.starts_with(prefix.as_str()) {
            return;
        }
        let cleaned = self.value.strip_prefix('+').unwrap_or(&self.value);
        let bare = prefix.strip_prefix('+').unwrap_or(&prefix);
        let next = if cleaned.starts_with(bare) {
            if prefix.starts_with('+') {
                format!("+{cleaned}")
            } else {
                cleaned.to_string()
            }
        } else {
            format!("{prefix}{cleaned}")
        };
        self.value = next;
        self.caret = self.grapheme_count();
    }

    /// Cap the value at the rule's maximum length in graphemes.
    fn truncate(&mut self) {
        let max = self.rule.rule().max_length;
        if max == 0 {
            return;
        }
        let byte = self.grapheme_byte_offset(max);
        if byte < self.value.len() {
            self.value.truncate(byte);
        }
    }

    // --- Internal helpers ---

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validity::{NOTICE_CODE_ENTER_VALID, NOTICE_CODE_INVALID_FORMAT};

    fn lithuanian_field() -> PhoneField {
        PhoneField::new(CountryRule::lithuania()).unwrap()
    }

    fn romanian_field() -> PhoneField {
        PhoneField::new(CountryRule::romania()).unwrap()
    }

    fn type_str(field: &mut PhoneField, s: &str) {
        for c in s.chars() {
            field.insert(c);
        }
    }

    #[test]
    fn new_field_is_seeded_and_neutral() {
        let field = lithuanian_field();
        assert_eq!(field.value(), "+370");
        assert_eq!(field.caret(), 4);
        assert!(field.validity().is_neutral());
        assert!(field.classes().is_empty());
        assert!(field.error().is_none());
    }

    #[test]
    fn typing_a_full_number_turns_valid_silently() {
        let mut field = lithuanian_field();
        type_str(&mut field, "61234567");
        assert_eq!(field.value(), "+37061234567");
        assert!(field.validity().is_valid());
        assert_eq!(field.classes(), StateClasses::VALID_SET);
        assert!(field.error().is_none());
    }

    #[test]
    fn partial_input_stays_neutral() {
        let mut field = lithuanian_field();
        type_str(&mut field, "612");
        assert!(field.validity().is_neutral());
        assert!(field.classes().is_empty());
    }

    #[test]
    fn blur_on_short_input_stays_neutral() {
        let mut field = lithuanian_field();
        field.insert('6');
        field.blur();
        assert!(field.validity().is_neutral());
        assert!(field.error().is_none());
    }

    #[test]
    fn blur_surfaces_wrong_significant_digit() {
        let mut field = lithuanian_field();
        type_str(&mut field, "81234567");
        assert_eq!(field.value(), "+37081234567");
        assert!(field.validity().is_neutral());
        field.blur();
        assert!(field.validity().is_invalid());
        assert_eq!(field.classes(), StateClasses::INVALID_SET);
        assert!(field.error().unwrap().contains("+3706"));
    }

    #[test]
    fn focus_clears_surfaced_error() {
        let mut field = lithuanian_field();
        type_str(&mut field, "81234567");
        field.blur();
        assert!(field.validity().is_invalid());
        field.focus();
        assert!(field.validity().is_neutral());
        assert!(field.classes().is_empty());
        assert!(field.error().is_none());
        assert!(field.is_focused());
    }

    #[test]
    fn focus_keeps_valid_presentation() {
        let mut field = lithuanian_field();
        type_str(&mut field, "61234567");
        field.blur();
        assert!(field.validity().is_valid());
        field.focus();
        assert!(field.validity().is_valid());
        assert_eq!(field.classes(), StateClasses::VALID_SET);
    }

    #[test]
    fn trunk_digit_is_rewritten_while_typing() {
        let mut field = lithuanian_field();
        field.insert('8');
        assert_eq!(field.value(), "+3708");
        field.insert('6');
        assert_eq!(field.value(), "+3706");
        assert_eq!(field.caret(), 5);
        type_str(&mut field, "1234567");
        assert_eq!(field.value(), "+37061234567");
        assert!(field.validity().is_valid());
    }

    #[test]
    fn rewrite_swallows_whitespace_between_digits() {
        let mut field = lithuanian_field();
        field.insert('8');
        field.insert(' ');
        assert_eq!(field.value(), "+3708 ");
        field.insert('6');
        assert_eq!(field.value(), "+3706");
        assert_eq!(field.caret(), 5);
    }

    #[test]
    fn rewrite_leaves_unrelated_digits_alone() {
        let mut field = lithuanian_field();
        type_str(&mut field, "88");
        assert_eq!(field.value(), "+37088");
    }

    #[test]
    fn pasted_bare_digits_get_plus_restored() {
        let mut field = lithuanian_field();
        field.set_value("37061234567");
        assert_eq!(field.value(), "+37061234567");
        assert_eq!(field.caret(), 12);
        assert!(field.validity().is_valid());
    }

    #[test]
    fn pasted_foreign_number_gets_prefix_prepended() {
        let mut field = lithuanian_field();
        field.set_value("61234567");
        assert_eq!(field.value(), "+37061234567");
        assert!(field.validity().is_valid());
    }

    #[test]
    fn clearing_reseeds_the_prefix() {
        let mut field = lithuanian_field();
        field.set_value("");
        assert_eq!(field.value(), "+370");
        assert!(field.validity().is_neutral());
    }

    #[test]
    fn typing_inside_prefix_reasserts_it() {
        let mut field = lithuanian_field();
        field.move_home();
        field.move_right();
        field.move_right();
        field.insert('9');
        assert_eq!(field.value(), "+3703970");
        assert_eq!(field.caret(), 8);
    }

    #[test]
    fn overlong_paste_is_truncated() {
        let mut field = lithuanian_field();
        field.set_value("+3706123456789999");
        assert_eq!(field.value(), "+37061234567");
        assert_eq!(field.caret(), 12);
        assert!(field.validity().is_valid());
    }

    #[test]
    fn typing_past_max_length_is_dropped() {
        let mut field = lithuanian_field();
        type_str(&mut field, "612345678888");
        assert_eq!(field.value(), "+37061234567");
    }

    #[test]
    fn deletion_blocked_inside_prefix_region() {
        let mut field = lithuanian_field();
        type_str(&mut field, "612");
        field.move_home();
        assert!(!field.delete_forward());
        field.move_right();
        field.move_right();
        assert!(!field.delete_back());
        assert!(!field.delete_forward());
        assert_eq!(field.value(), "+370612");
    }

    #[test]
    fn deletion_blocked_at_prefix_boundary() {
        let mut field = lithuanian_field();
        type_str(&mut field, "612");
        field.move_home();
        for _ in 0..4 {
            field.move_right();
        }
        assert_eq!(field.caret(), 4);
        assert!(!field.delete_back());
        assert!(!field.delete_forward());
        assert_eq!(field.value(), "+370612");
    }

    #[test]
    fn deletion_works_past_the_prefix() {
        let mut field = lithuanian_field();
        type_str(&mut field, "612");
        assert!(field.delete_back());
        assert_eq!(field.value(), "+37061");
        field.move_left();
        assert!(field.delete_forward());
        assert_eq!(field.value(), "+3706");
    }

    #[test]
    fn delete_forward_at_end_is_noop() {
        let mut field = lithuanian_field();
        type_str(&mut field, "612");
        assert!(!field.delete_forward());
        assert_eq!(field.value(), "+370612");
    }

    #[test]
    fn caret_movement_clamps_at_bounds() {
        let mut field = lithuanian_field();
        field.move_home();
        field.move_left();
        assert_eq!(field.caret(), 0);
        field.move_end();
        field.move_right();
        assert_eq!(field.caret(), 4);
    }

    #[test]
    fn romania_full_number_is_valid() {
        let mut field = romanian_field();
        assert_eq!(field.value(), "07");
        type_str(&mut field, "12345678");
        assert_eq!(field.value(), "0712345678");
        assert!(field.validity().is_valid());
    }

    #[test]
    fn romania_foreign_prefix_paste_is_reasserted_and_truncated() {
        // "06…" gets the prefix prepended ("070612345678") and the tail cut
        // at the maximum length; the surviving digits satisfy the pattern.
        let mut field = romanian_field();
        field.set_value("0612345678");
        assert_eq!(field.value(), "0706123456");
        assert!(field.validity().is_valid());
    }

    #[test]
    fn romania_stray_plus_is_dropped_on_reassertion() {
        // The national-format prefix carries no "+", so none is restored;
        // "+07…" must repair to "07…", not survive as-is.
        let mut field = romanian_field();
        field.move_home();
        field.insert('+');
        assert_eq!(field.value(), "07");

        field.set_value("+0712345678");
        assert_eq!(field.value(), "0712345678");
        assert!(field.validity().is_valid());
    }

    #[test]
    fn romania_malformed_number_surfaces_generic_message() {
        let mut field = romanian_field();
        field.set_value("07123x5678");
        assert!(field.validity().is_neutral());
        field.blur();
        let notice = field.validity().notice().unwrap();
        assert_eq!(notice.code, NOTICE_CODE_INVALID_FORMAT);
    }

    #[test]
    fn blur_without_prefix_uses_generic_message() {
        // A rule with no prefix never re-asserts, so the generic message
        // path is reachable.
        let mut rule = CountryRule::lithuania();
        rule.prefix = String::new();
        rule.rewrite = None;
        let mut field = PhoneField::new(rule).unwrap();
        field.set_value("861234567890");
        field.blur();
        let notice = field.validity().notice().unwrap();
        assert_eq!(notice.code, NOTICE_CODE_ENTER_VALID);
    }

    #[test]
    fn unicode_input_is_grapheme_counted() {
        let mut field = lithuanian_field();
        field.insert_str("ąčę");
        assert_eq!(field.value(), "+370ąčę");
        assert_eq!(field.caret(), 7);
        assert!(field.delete_back());
        assert_eq!(field.value(), "+370ąč");
    }

    #[test]
    fn config_exposes_rule_knobs() {
        let field = lithuanian_field();
        let config = field.config();
        assert_eq!(config.prefix, "+370");
        assert_eq!(config.max_length, 12);
    }
}
