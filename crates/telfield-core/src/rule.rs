#![forbid(unsafe_code)]

//! Country rule records.
//!
//! A [`CountryRule`] bundles everything one checkout deployment needs for its
//! phone field: the immutable prefix, the anchored validation pattern, the
//! optional local-format auto-correction, length gates, and localized
//! feedback messages. Rules are plain data so deployments can ship their own
//! (TOML/JSON behind the `serde` feature); Lithuania and Romania are built in.

use std::fmt;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::digits;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Localized feedback messages for one country rule.
///
/// Which message is surfaced is decided by the validation algorithm and by
/// the submission guard; the texts themselves are deployment data.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Messages {
    /// The prefix is present but the digit after it is wrong
    /// (interactive), or the number has the right prefix but the wrong
    /// length (submission guard).
    pub wrong_prefix: String,
    /// The prefix is present but the rest of the number is malformed.
    pub invalid_format: String,
    /// Generic fallback naming the expected format.
    pub enter_valid: String,
}

// ---------------------------------------------------------------------------
// PrefixRewrite
// ---------------------------------------------------------------------------

/// Auto-correction applied to the text right after the prefix.
///
/// When the national part starts with `strip` followed by optional
/// whitespace and then `before`, the `strip` run (and the whitespace) is
/// removed. This covers habits like typing the Lithuanian trunk `8` after
/// the `+370` prefix: `+370 86…` becomes `+370 6…` as the user types.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrefixRewrite {
    /// Run removed from the head of the national part.
    pub strip: String,
    /// Digit that must follow for the rewrite to fire.
    pub before: char,
}

// ---------------------------------------------------------------------------
// CountryRule
// ---------------------------------------------------------------------------

/// A country's phone number rule: one prefix/length pair plus messages.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CountryRule {
    /// Country name, used as the field label.
    pub name: String,
    /// Flag glyph for the field decoration. May be empty.
    pub flag: String,
    /// Immutable prefix seeded into empty fields (e.g. `+370`, `07`).
    /// May be empty, which disables seeding and prefix re-assertion.
    pub prefix: String,
    /// Validation pattern, matched against the whitespace-stripped value.
    /// The pattern carries its own anchors (`^…$`).
    pub pattern: String,
    /// The single digit required right after the prefix, when the rule
    /// has one. Drives the targeted `wrong_prefix` message.
    #[cfg_attr(feature = "serde", serde(default))]
    pub significant_digit: Option<char>,
    /// Optional auto-correction for a common local typing habit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rewrite: Option<PrefixRewrite>,
    /// Minimum whitespace-stripped length before failures may surface.
    pub min_significant: usize,
    /// Maximum field length in graphemes (0 = unlimited).
    pub max_length: usize,
    /// Localized feedback messages.
    pub messages: Messages,
}

impl CountryRule {
    /// Lithuanian mobile numbers: `+3706XXXXXXX`.
    #[must_use]
    pub fn lithuania() -> Self {
        Self {
            name: "Lithuania".to_string(),
            flag: "🇱🇹".to_string(),
            prefix: "+370".to_string(),
            pattern: r"^\+370[6]\d{7}$".to_string(),
            significant_digit: Some('6'),
            rewrite: Some(PrefixRewrite {
                strip: "8".to_string(),
                before: '6',
            }),
            min_significant: 12,
            max_length: 12,
            messages: Messages {
                wrong_prefix: "Lietuvos mobiliojo telefono numeris turi prasidėti +3706"
                    .to_string(),
                invalid_format: "Netinkamas telefono numerio formatas".to_string(),
                enter_valid:
                    "Įveskite galiojantį Lietuvos mobiliojo telefono numerį formatu +3706XXXXXXX"
                        .to_string(),
            },
        }
    }

    /// Romanian mobile numbers: `07XXXXXXXX`.
    #[must_use]
    pub fn romania() -> Self {
        Self {
            name: "Romania".to_string(),
            flag: "🇷🇴".to_string(),
            prefix: "07".to_string(),
            pattern: r"^07\d{8}$".to_string(),
            significant_digit: None,
            rewrite: None,
            min_significant: 10,
            max_length: 10,
            messages: Messages {
                wrong_prefix:
                    "Numărul de telefon mobil românesc trebuie să înceapă cu 07. Verificați numărul dvs."
                        .to_string(),
                invalid_format:
                    "Introduceți un număr de telefon mobil românesc valid în formatul 07XXXXXXXX"
                        .to_string(),
                enter_valid:
                    "Introduceți un număr de telefon mobil românesc valid în formatul 07XXXXXXXX"
                        .to_string(),
            },
        }
    }

    /// The prefix without its leading `+`, if any.
    #[must_use]
    pub fn bare_prefix(&self) -> &str {
        digits::strip_plus(&self.prefix)
    }

    /// The two knobs embedders mirror onto the raw field element.
    #[must_use]
    pub fn field_config(&self) -> FieldConfig {
        FieldConfig {
            prefix: self.prefix.clone(),
            max_length: self.max_length,
        }
    }
}

// ---------------------------------------------------------------------------
// FieldConfig
// ---------------------------------------------------------------------------

/// Derived view of a rule for embedders that only need the field knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfig {
    /// Prefix seeded into empty fields.
    pub prefix: String,
    /// Maximum field length in graphemes (0 = unlimited).
    pub max_length: usize,
}

// ---------------------------------------------------------------------------
// RuleError
// ---------------------------------------------------------------------------

/// Rule compilation failure.
#[derive(Debug)]
pub enum RuleError {
    /// The validation pattern failed to compile.
    Pattern(regex::Error),
    /// The prefix does not fit within the rule's own maximum length.
    PrefixTooLong {
        /// Prefix length in graphemes.
        prefix: usize,
        /// Configured maximum field length.
        max_length: usize,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(err) => write!(f, "invalid country pattern: {err}"),
            Self::PrefixTooLong { prefix, max_length } => {
                write!(f, "prefix length {prefix} exceeds max length {max_length}")
            }
        }
    }
}

impl std::error::Error for RuleError {}

impl From<regex::Error> for RuleError {
    fn from(err: regex::Error) -> Self {
        Self::Pattern(err)
    }
}

// ---------------------------------------------------------------------------
// CompiledRule
// ---------------------------------------------------------------------------

/// A rule with its pattern compiled, ready for per-keystroke matching.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: CountryRule,
    pattern: Regex,
    prefix_len: usize,
}

impl CompiledRule {
    /// Compile `rule`, validating the pattern and length configuration.
    pub fn new(rule: CountryRule) -> Result<Self, RuleError> {
        let prefix_len = rule.prefix.graphemes(true).count();
        if rule.max_length > 0 && prefix_len > rule.max_length {
            return Err(RuleError::PrefixTooLong {
                prefix: prefix_len,
                max_length: rule.max_length,
            });
        }
        let pattern = Regex::new(&rule.pattern)?;
        Ok(Self {
            rule,
            pattern,
            prefix_len,
        })
    }

    /// The rule record this was compiled from.
    #[must_use]
    pub fn rule(&self) -> &CountryRule {
        &self.rule
    }

    /// Prefix length in graphemes.
    #[must_use]
    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// Test a whitespace-stripped value against the country pattern.
    #[must_use]
    pub fn is_match(&self, stripped: &str) -> bool {
        self.pattern.is_match(stripped)
    }
}
