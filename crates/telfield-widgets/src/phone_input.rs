#![forbid(unsafe_code)]

//! Phone input widget.
//!
//! [`PhoneInput`] draws one phone field inside a bordered block titled with
//! the country name: an optional flag gutter on the left, the value with a
//! reverse-video caret, a ✓/✗ verdict glyph on the right once the field has
//! a judgement, and the surfaced error message on the line below the value.
//! The field-level validity tints the value text; the wrapper-level flags
//! tint the border.
//!
//! [`PhoneInputState`] owns the [`PhoneField`] controller and translates
//! terminal events into edits. Focus is managed by the embedder (the widget
//! never grabs it), so forms with several fields can route keys themselves.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, StatefulWidget, Widget};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use telfield_core::{CountryRule, PhoneField, RuleError, StateClasses};

// --- PhoneInput ---

/// Renders a [`PhoneInputState`]. Styling is configured on the widget; all
/// live data lives in the state.
#[derive(Debug, Clone)]
pub struct PhoneInput {
    style: Style,
    valid_style: Style,
    invalid_style: Style,
    error_style: Style,
    show_flag: bool,
}

impl Default for PhoneInput {
    fn default() -> Self {
        Self {
            style: Style::default(),
            valid_style: Style::default().fg(Color::Green),
            invalid_style: Style::default().fg(Color::Red),
            error_style: Style::default().fg(Color::Red),
            show_flag: true,
        }
    }
}

impl PhoneInput {
    /// Widget with the default styling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Base style for the value text and decorations.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Style applied once the value matches the country pattern.
    #[must_use]
    pub fn with_valid_style(mut self, style: Style) -> Self {
        self.valid_style = style;
        self
    }

    /// Style applied while an error is surfaced.
    #[must_use]
    pub fn with_invalid_style(mut self, style: Style) -> Self {
        self.invalid_style = style;
        self
    }

    /// Style of the error message line.
    #[must_use]
    pub fn with_error_style(mut self, style: Style) -> Self {
        self.error_style = style;
        self
    }

    /// Show or hide the country flag gutter.
    #[must_use]
    pub fn with_flag(mut self, show: bool) -> Self {
        self.show_flag = show;
        self
    }
}

// --- PhoneInputState ---

/// Widget state: the field controller plus presentation bookkeeping.
#[derive(Debug, Clone)]
pub struct PhoneInputState {
    field: PhoneField,
    /// Horizontal scroll of the value viewport, in display columns.
    scroll: usize,
    /// Rows available at first paint. Measured once; the error line is only
    /// drawn when this first measurement had room for it.
    measured_rows: Option<u16>,
}

impl PhoneInputState {
    /// Create the state for one country rule.
    pub fn new(rule: CountryRule) -> Result<Self, RuleError> {
        Ok(Self {
            field: PhoneField::new(rule)?,
            scroll: 0,
            measured_rows: None,
        })
    }

    /// The underlying field controller.
    #[must_use]
    pub fn field(&self) -> &PhoneField {
        &self.field
    }

    /// Mutable access to the field controller.
    pub fn field_mut(&mut self) -> &mut PhoneField {
        &mut self.field
    }

    /// Give the field keyboard focus, clearing any surfaced error.
    pub fn focus(&mut self) {
        self.field.focus();
    }

    /// Take focus away, re-running validation with errors surfaced.
    pub fn blur(&mut self) {
        self.field.blur();
    }

    /// Feed one terminal event to the field.
    ///
    /// Returns `true` when the event was consumed. A blocked deletion (the
    /// caret inside the prefix region) still consumes its key, matching how
    /// the field swallows the keypress instead of letting it bubble.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                self.handle_key(*key)
            }
            Event::Paste(text) => {
                if !self.field.is_focused() {
                    return false;
                }
                self.field.insert_str(text);
                true
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.field.is_focused() {
            return false;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.field.insert(c);
                true
            }
            (KeyCode::Backspace, KeyModifiers::NONE) => {
                let _ = self.field.delete_back();
                true
            }
            (KeyCode::Delete, KeyModifiers::NONE) => {
                let _ = self.field.delete_forward();
                true
            }
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.field.move_left();
                true
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                self.field.move_right();
                true
            }
            (KeyCode::Home, _) => {
                self.field.move_home();
                true
            }
            (KeyCode::End, _) => {
                self.field.move_end();
                true
            }
            (KeyCode::Char('a'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.field.move_home();
                true
            }
            (KeyCode::Char('e'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.field.move_end();
                true
            }
            _ => false,
        }
    }

    /// Scroll adjusted so the caret column stays inside the viewport.
    fn effective_scroll(&self, caret_col: usize, viewport: usize) -> usize {
        let mut scroll = self.scroll;
        if caret_col < scroll {
            scroll = caret_col;
        }
        if caret_col >= scroll + viewport {
            scroll = caret_col - viewport + 1;
        }
        scroll
    }
}

// --- Rendering ---

impl StatefulWidget for PhoneInput {
    type State = PhoneInputState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "PhoneInput",
            w = area.width,
            h = area.height
        )
        .entered();

        let classes = state.field.classes();
        let border_style = if classes.contains(StateClasses::HAS_INVALID) {
            self.invalid_style
        } else if classes.contains(StateClasses::HAS_VALID) {
            self.valid_style
        } else {
            Style::default()
        };
        let block = Block::bordered()
            .title(state.field.rule().name.clone())
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        let rows = *state.measured_rows.get_or_insert(inner.height);
        let field_row = inner.y;

        // Flag gutter.
        let mut value_x = inner.x;
        if self.show_flag {
            let flag = state.field.rule().flag.clone();
            let flag_width = flag.width() as u16;
            if flag_width > 0 && flag_width + 1 < inner.width {
                buf.set_stringn(inner.x, field_row, &flag, flag_width as usize, self.style);
                value_x = inner.x + flag_width + 1;
            }
        }

        // Verdict glyph in the rightmost column, one gap column before it.
        let mut value_end = inner.right();
        if classes.contains(StateClasses::HAS_ICON) && value_end > value_x + 2 {
            let icon_x = value_end - 1;
            if classes.contains(StateClasses::HAS_VALID) {
                buf.set_string(icon_x, field_row, "✓", self.valid_style);
            } else {
                buf.set_string(icon_x, field_row, "✗", self.invalid_style);
            }
            value_end = icon_x - 1;
        }

        let viewport = value_end.saturating_sub(value_x) as usize;
        if viewport == 0 {
            return;
        }

        let value_style = if classes.contains(StateClasses::VALID) {
            self.valid_style
        } else if classes.contains(StateClasses::INVALID) {
            self.invalid_style
        } else {
            self.style
        };

        // Value with horizontal scrolling, grapheme by grapheme.
        let value = state.field.value().to_owned();
        let graphemes: Vec<&str> = value.graphemes(true).collect();
        let caret = state.field.caret().min(graphemes.len());
        let caret_col: usize = graphemes[..caret].iter().map(|g| g.width()).sum();
        state.scroll = state.effective_scroll(caret_col, viewport);
        let scroll = state.scroll;

        let mut visual_x = 0usize;
        for g in &graphemes {
            let w = g.width();
            if visual_x + w <= scroll {
                visual_x += w;
                continue;
            }
            let rel = visual_x.saturating_sub(scroll);
            if rel + w > viewport {
                break;
            }
            buf.set_stringn(value_x + rel as u16, field_row, *g, w, value_style);
            visual_x += w;
        }

        // Reverse-video caret over whatever cell it lands on.
        if state.field.is_focused() {
            let rel = caret_col.saturating_sub(scroll);
            if rel < viewport {
                if let Some(cell) = buf.cell_mut((value_x + rel as u16, field_row)) {
                    cell.set_style(Style::default().add_modifier(Modifier::REVERSED));
                }
            }
        }

        // Error line below the value, only when the first paint had room.
        if rows >= 2 && inner.height >= 2 {
            if let Some(message) = state.field.error() {
                buf.set_stringn(
                    inner.x,
                    inner.y + 1,
                    message,
                    inner.width as usize,
                    self.error_style,
                );
            }
        }
    }
}
