#![forbid(unsafe_code)]

//! Checkout form state and event routing.
//!
//! [`CheckoutApp`] owns the two form fields and the submission guard. Key
//! events go to whichever field holds focus; Enter runs the posted phone
//! number through the guard the way a checkout backend would, independent of
//! whatever the interactive field last showed.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use telfield::{CountryRule, FieldMeta, Notice, PhoneInputState, Result, SubmissionGuard};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

/// Which form field receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The free-text name field.
    Name,
    /// The phone field widget.
    Phone,
}

// ---------------------------------------------------------------------------
// CheckoutApp
// ---------------------------------------------------------------------------

/// Top-level state for the checkout demo.
pub struct CheckoutApp {
    /// Customer name, a plain free-text field.
    pub name: String,
    /// Phone field widget state.
    pub phone: PhoneInputState,
    /// Field metadata stamped by the guard (maxlength, inputmode).
    pub meta: FieldMeta,
    guard: SubmissionGuard,
    focus: Focus,
    notice: Option<Notice>,
    submitted: Option<String>,
    should_quit: bool,
}

impl CheckoutApp {
    /// Build the form for one country rule.
    pub fn new(rule: CountryRule) -> Result<Self> {
        let guard = SubmissionGuard::for_rule(&rule);
        let mut meta = FieldMeta::default();
        guard.apply(&mut meta);
        let phone = PhoneInputState::new(rule)?;
        Ok(Self {
            name: String::new(),
            phone,
            meta,
            guard,
            focus: Focus::Name,
            notice: None,
            submitted: None,
            should_quit: false,
        })
    }

    /// Which field currently has focus.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// The guard's verdict from the last failed submit, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The accepted phone number from the last successful submit, if any.
    pub fn submitted(&self) -> Option<&str> {
        self.submitted.as_deref()
    }

    /// Whether the event loop should exit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Route one terminal event into the form.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.handle_key(*key);
            }
            Event::Paste(_) => {
                if self.focus == Focus::Phone {
                    self.phone.handle_event(event);
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
            }
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) => self.cycle_focus(),
            (KeyCode::Enter, _) => self.submit(),
            _ => match self.focus {
                Focus::Phone => {
                    self.phone.handle_event(&Event::Key(key));
                }
                Focus::Name => self.edit_name(key),
            },
        }
    }

    fn edit_name(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => self.name.push(c),
            (KeyCode::Backspace, KeyModifiers::NONE) => {
                self.name.pop();
            }
            _ => {}
        }
    }

    /// Move focus to the other field, keeping the phone widget's own
    /// focus state (and therefore its blur-time validation) in step.
    fn cycle_focus(&mut self) {
        match self.focus {
            Focus::Name => {
                self.focus = Focus::Phone;
                self.phone.focus();
            }
            Focus::Phone => {
                self.phone.blur();
                self.focus = Focus::Name;
            }
        }
    }

    fn submit(&mut self) {
        let value = self.phone.field().value().to_owned();
        match self.guard.check(&value) {
            Ok(()) => {
                tracing::info!(name = %self.name, phone = %value, "order accepted");
                self.submitted = Some(value);
                self.notice = None;
            }
            Err(notice) => {
                self.submitted = None;
                self.notice = Some(notice);
            }
        }
    }
}
