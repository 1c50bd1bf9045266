use anyhow::Result;
use dashboard::Dashboard;
use event::EventBus;
use log::debug;
use ratatui::prelude::*;
use simplelog::{LevelFilter, WriteLogger};
use std::{fs::File, io};

mod config;
mod dashboard;
mod event;
mod form;
mod panes;
mod store;
mod styles;
mod tui;
mod widgets;

/// A full-terminal view, receiving every event while it's active.
pub trait Screen {
    fn draw(&mut self, frame: &mut Frame);
    fn handle_event(&mut self, event: event::Event) -> Result<()>;
    fn running(&self) -> bool;
}

fn main() -> Result<()> {
    WriteLogger::init(
        LevelFilter::Debug,
        simplelog::Config::default(),
        File::create("roster-tui.log")?,
    )?;

    let config = config::Config::load().unwrap_or_else(|e| {
        debug!("no user config ({}), using defaults", e);
        config::Config::default()
    });

    let backend = CrosstermBackend::new(io::stderr());
    let mut terminal = Terminal::new(backend)?;

    let events = EventBus::new();
    events.spawn_terminal_listener();

    let mut dashboard = Dashboard::new(&events, config.api_config());

    tui::init(&mut terminal)?;

    while dashboard.running() {
        tui::draw(&mut terminal, &mut dashboard)?;
        dashboard.handle_event(events.next()?)?;
    }

    tui::exit(&mut terminal)?;

    Ok(())
}
