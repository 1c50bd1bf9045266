use ratatui::{
    prelude::Text,
    style::{Color, Style},
    widgets::{Block, Borders},
};

pub fn error_text(t: impl Into<Text<'static>>) -> Text<'static> {
    let mut t = t.into();
    t.patch_style(Style::default().fg(Color::Red));
    t
}

pub fn dim_text(t: impl Into<Text<'static>>) -> Text<'static> {
    let mut t = t.into();
    t.patch_style(Style::default().fg(Color::DarkGray));
    t
}

/// Bordered block, with the border highlighted when the pane has focus.
pub fn pane_block(title: &'static str, focused: bool) -> Block<'static> {
    let block = Block::default().title(title).borders(Borders::ALL);
    if focused {
        block.border_style(Style::default().fg(Color::Cyan))
    } else {
        block
    }
}
