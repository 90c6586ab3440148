#![forbid(unsafe_code)]
//! Terminal widgets for telfield.
//!
//! [`PhoneInput`] renders a single phone field as a bordered box with the
//! country flag, the live value, a validity glyph and an inline error line.
//! [`PhoneInputState`] owns the [`telfield_core::PhoneField`] controller and
//! translates terminal events into edits, so the embedding application only
//! forwards [`crossterm::event::Event`]s and decides which widget has focus.

pub mod phone_input;

pub use phone_input::{PhoneInput, PhoneInputState};
