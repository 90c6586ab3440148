#![forbid(unsafe_code)]

//! Frame composition for the checkout demo.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use telfield::PhoneInput;

use crate::app::{CheckoutApp, Focus};

/// Draw the whole form into one frame.
pub fn draw(f: &mut Frame, app: &mut CheckoutApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(f.area());

    let title =
        Paragraph::new("Checkout").style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(title, chunks[0]);

    render_name(f, chunks[1], app);
    f.render_stateful_widget(PhoneInput::new(), chunks[2], &mut app.phone);
    render_status(f, chunks[3], app);
    render_help(f, chunks[4], app);
}

fn render_name(f: &mut Frame, area: Rect, app: &CheckoutApp) {
    let border = if app.focus() == Focus::Name {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let name = Paragraph::new(app.name.as_str())
        .block(Block::bordered().title("Name").border_style(border));
    f.render_widget(name, area);
}

fn render_status(f: &mut Frame, area: Rect, app: &CheckoutApp) {
    let status = if let Some(number) = app.submitted() {
        Paragraph::new(format!("Order placed. We will call {number}."))
            .style(Style::default().fg(Color::Green))
    } else if let Some(notice) = app.notice() {
        Paragraph::new(notice.message.as_str()).style(Style::default().fg(Color::Red))
    } else {
        Paragraph::new("")
    };
    f.render_widget(status, area);
}

fn render_help(f: &mut Frame, area: Rect, app: &CheckoutApp) {
    let mut hints = vec![
        "Tab fields".to_string(),
        "Enter submit".to_string(),
        "Esc quit".to_string(),
    ];
    if let Some(max) = app.meta.max_length {
        hints.push(format!("maxlength {max}"));
    }
    if let Some(mode) = app.meta.input_mode {
        hints.push(format!("inputmode {}", mode.as_str()));
    }
    let help = Paragraph::new(hints.join("  ·  ")).style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}
