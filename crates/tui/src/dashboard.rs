use anyhow::Result;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::{Constraint, Direction, Layout},
    text::Text,
    widgets::Paragraph,
    Frame,
};
use roster_api::{ApiConfig, MockApi};

use crate::{
    event::{Event, EventBus},
    form::{FormOutcome, StudentForm},
    panes::{Action, CoursesPane, Pane, RosterPane},
    store::{Stats, Store, Worker},
    styles, Screen,
};

/// The dashboard screen: stats on top, course catalog on the left, roster on
/// the right, a flash line at the bottom, and an optional modal form over it
/// all. The bulk of the UI logic is handled by the [`crate::panes`]; this
/// just owns shared state and applies their requested actions.
pub struct Dashboard {
    running: bool,
    store: Store,
    courses_pane: CoursesPane,
    roster_pane: RosterPane,
    roster_focused: bool,
    form: Option<StudentForm>,
    flash: Text<'static>,
}

impl Dashboard {
    /// Create the dashboard and immediately kick off the first catalog
    /// fetch, so the courses pane starts out in `Loading`.
    pub fn new(events: &EventBus, api_config: ApiConfig) -> Self {
        let mut store = Store::new(Worker::spawn_on(events, MockApi::new(api_config)));
        store.load_courses();

        Self {
            running: true,
            store,
            courses_pane: CoursesPane::default(),
            roster_pane: RosterPane::default(),
            roster_focused: true,
            form: None,
            flash: Text::raw(""),
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // a modal form swallows everything
        if let Some(form) = &mut self.form {
            match form.handle_key(key) {
                FormOutcome::Open => (),
                FormOutcome::Cancel => self.form = None,
                FormOutcome::Submit(None, draft) => {
                    let added = self.store.add_student(draft);
                    self.flash = Text::raw(format!("added {}", added.name));
                    self.form = None;
                }
                FormOutcome::Submit(Some(id), draft) => {
                    let name = draft.name.clone();
                    if self.store.update_student(&id, draft) {
                        self.flash = Text::raw(format!("updated {}", name));
                    } else {
                        self.flash = styles::error_text(format!("{} no longer exists", name));
                    }
                    self.form = None;
                }
            };
            return Ok(());
        }

        // Exit application on `Ctrl-C`
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.quit();
            return Ok(());
        }
        if key.code == KeyCode::Tab {
            self.roster_focused = !self.roster_focused;
            return Ok(());
        }

        let action = match self.roster_focused {
            true => self.roster_pane.handle_key(&self.store, key),
            false => self.courses_pane.handle_key(&self.store, key),
        }?;

        match action {
            Action::None => (),
            Action::Exit => self.quit(),
            Action::Reload => {
                self.store.load_courses();
                self.flash = Text::raw("reloading courses...");
            }
            Action::OpenForm(form) => self.form = Some(form),
            Action::DeleteStudent(id) => {
                if self.store.remove_student(&id) {
                    self.flash = Text::raw("student removed");
                }
            }
            Action::Flash(t) => self.flash = t,
        };

        Ok(())
    }

    fn stats_line(&self) -> String {
        let stats = Stats::derive(
            self.store.students(),
            self.store.courses().unwrap_or(&[]),
            Utc::now(),
        );
        format!(
            " {} students | {} courses | {} enrolled in the last 30 days | ~{} students/course",
            stats.total_students,
            stats.total_courses,
            stats.recent_enrollments,
            stats.avg_students_per_course
        )
    }
}

impl Screen for Dashboard {
    fn draw(&mut self, frame: &mut Frame) {
        let rows = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ],
        )
        .split(frame.size());

        frame.render_widget(Paragraph::new(self.stats_line()), rows[0]);

        // 35/65 split the two panes
        let cols = Layout::new(
            Direction::Horizontal,
            [Constraint::Percentage(35), Constraint::Percentage(65)],
        )
        .split(rows[1]);

        self.courses_pane
            .draw(&self.store, frame, cols[0], !self.roster_focused);
        self.roster_pane
            .draw(&self.store, frame, cols[1], self.roster_focused);

        frame.render_widget(Paragraph::new(self.flash.clone()), rows[2]);

        if let Some(form) = &mut self.form {
            form.draw(frame);
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => self.handle_key(key)?,
            Event::Resize(_, _) => (),
            Event::Store(e) => self.store.event(e),
        };

        Ok(())
    }

    fn running(&self) -> bool {
        self.running
    }
}
