use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::Rect,
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::{Action, Pane};
use crate::{
    store::{CoursesState, Store},
    styles,
    widgets::StatefulList,
};

/// Left pane: the course catalog, in whatever state the fetch is in.
#[derive(Default)]
pub struct CoursesPane {
    list: StatefulList,
}

impl Pane for CoursesPane {
    fn draw(&mut self, store: &Store, frame: &mut Frame, area: Rect, focused: bool) {
        let block = styles::pane_block("Courses", focused);

        match store.courses_state() {
            CoursesState::Idle | CoursesState::Loading => {
                frame.render_widget(
                    Paragraph::new(styles::dim_text("Loading courses...")).block(block),
                    area,
                );
            }
            CoursesState::Error(msg) => {
                let mut text = styles::error_text(msg.clone());
                text.lines.extend(styles::dim_text("press r to retry").lines);
                frame.render_widget(Paragraph::new(text).block(block), area);
            }
            CoursesState::Ready(courses) => {
                let items = courses.iter().map(|c| {
                    let enrolled = store
                        .students()
                        .iter()
                        .filter(|s| s.course_id == c.id)
                        .count();
                    ListItem::new(format!("{} ({} enrolled)", c.name, enrolled))
                });
                self.list.render_to(
                    frame,
                    area,
                    List::new(items).block(block).highlight_symbol(">>"),
                );
            }
        }
    }

    fn handle_key(&mut self, _store: &Store, key: KeyEvent) -> Result<Action> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.list.next(),
            KeyCode::Up | KeyCode::Char('k') => self.list.previous(),
            KeyCode::Char('r') => return Ok(Action::Reload),
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Action::Exit),
            _ => (),
        };

        Ok(Action::None)
    }
}
