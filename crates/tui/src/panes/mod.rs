use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{prelude::Rect, text::Text, Frame};

use crate::{form::StudentForm, store::Store};

mod courses;
mod roster;

pub use courses::CoursesPane;
pub use roster::RosterPane;

/// An action that a [`Pane`] can request to be taken
pub enum Action {
    /// Do nothing
    None,

    /// Quit the application
    Exit,

    /// Fetch the course catalog (again)
    Reload,

    /// Open the add/edit form as a modal
    OpenForm(StudentForm),

    /// Remove the student with the given id from the roster
    DeleteStudent(String),

    /// Display the given string at the bottom of the screen
    Flash(Text<'static>),
}

pub trait Pane {
    fn draw(&mut self, store: &Store, frame: &mut Frame, area: Rect, focused: bool);
    fn handle_key(&mut self, store: &Store, key: KeyEvent) -> Result<Action>;
}
