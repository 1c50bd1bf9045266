use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::{Constraint, Direction, Layout, Rect},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use roster_api::{course::Course, student::Student};
use std::collections::HashSet;

use super::{Action, Pane};
use crate::{
    form::StudentForm,
    store::{filter_students, CourseFilter, Store},
    styles,
    widgets::StatefulList,
};

/// Right pane: the searchable, filterable student roster.
#[derive(Default)]
pub struct RosterPane {
    list: StatefulList,
    search: String,
    /// Keys currently edit the search box instead of navigating
    searching: bool,
    filter: CourseFilter,
    /// Course lookups already sent, so selection changes don't re-request
    requested_details: HashSet<u32>,
}

impl Pane for RosterPane {
    fn draw(&mut self, store: &Store, frame: &mut Frame, area: Rect, focused: bool) {
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(2),
            ],
        )
        .split(area);

        let search_line = format!(
            "/{}{}   [{}]",
            self.search,
            if self.searching { "_" } else { "" },
            self.filter_label(store)
        );
        frame.render_widget(
            Paragraph::new(search_line).block(styles::pane_block("Search", self.searching)),
            layout[0],
        );

        let filtered = filter_students(store.students(), &self.search, self.filter);
        let items = filtered
            .iter()
            .map(|s| ListItem::new(format!("{}  <{}>", s.name, s.email)));
        self.list.render_to(
            frame,
            layout[1],
            List::new(items)
                .block(styles::pane_block("Students", focused && !self.searching))
                .highlight_symbol(">>"),
        );

        let detail = match self.selected_student(store) {
            Some(s) => self.detail_line(store, s),
            None => styles::dim_text("a: add  e: edit  d: delete  /: search  f: filter"),
        };
        frame.render_widget(Paragraph::new(detail), layout[2]);
    }

    fn handle_key(&mut self, store: &Store, key: KeyEvent) -> Result<Action> {
        if self.searching {
            match key.code {
                KeyCode::Char(c) => self.search.push(c),
                KeyCode::Backspace => {
                    self.search.pop();
                }
                KeyCode::Enter | KeyCode::Esc => self.searching = false,
                _ => (),
            };
            return Ok(Action::None);
        }

        match key.code {
            KeyCode::Char('/') => self.searching = true,
            KeyCode::Down | KeyCode::Char('j') => {
                self.list.next();
                self.request_selected_detail(store);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.list.previous();
                self.request_selected_detail(store);
            }
            KeyCode::Char('f') => match store.courses() {
                Some(courses) => self.cycle_filter(courses),
                None => {
                    return Ok(Action::Flash(styles::error_text(
                        "can't filter until courses have loaded",
                    )))
                }
            },
            KeyCode::Char('a') => match store.courses() {
                Some(courses) if !courses.is_empty() => {
                    return Ok(Action::OpenForm(StudentForm::add(courses.to_vec())))
                }
                _ => {
                    return Ok(Action::Flash(styles::error_text(
                        "can't add students until courses have loaded",
                    )))
                }
            },
            KeyCode::Char('e') => {
                if let (Some(student), Some(courses)) =
                    (self.selected_student(store), store.courses())
                {
                    return Ok(Action::OpenForm(StudentForm::edit(
                        student,
                        courses.to_vec(),
                    )));
                }
                return Ok(Action::Flash(styles::error_text(
                    "need a selected student and loaded courses to edit",
                )));
            }
            KeyCode::Char('d') => {
                if let Some(student) = self.selected_student(store) {
                    return Ok(Action::DeleteStudent(student.id.clone()));
                }
            }
            // retry/reload works from either pane
            KeyCode::Char('r') => return Ok(Action::Reload),
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Action::Exit),
            _ => (),
        };

        Ok(Action::None)
    }
}

impl RosterPane {
    fn selected_student<'a>(&self, store: &'a Store) -> Option<&'a Student> {
        let filtered = filter_students(store.students(), &self.search, self.filter);
        self.list.selected().and_then(|i| filtered.get(i).copied())
    }

    /// Lazily fetch the selected student's course over the mock backend, for
    /// the detail line. One request per course id is enough.
    fn request_selected_detail(&mut self, store: &Store) {
        let Some(id) = self.selected_student(store).map(|s| s.course_id) else {
            return;
        };
        if store.course_detail(id).is_none() && self.requested_details.insert(id) {
            store.request_course_detail(id);
        }
    }

    /// The detail line names the course through the lookup cache, falling
    /// back to a placeholder label rather than guessing from the catalog.
    fn detail_line(&self, store: &Store, student: &Student) -> ratatui::text::Text<'static> {
        let course = match store.course_detail(student.course_id) {
            Some(Some(course)) => course.name.clone(),
            Some(None) => "unknown course".to_string(),
            None => "...".to_string(),
        };
        styles::dim_text(format!("{}  enrolled in: {}", student.email, course))
    }

    fn filter_label(&self, store: &Store) -> String {
        match self.filter {
            CourseFilter::All => "all courses".to_string(),
            CourseFilter::Course(id) => store
                .courses()
                .and_then(|cs| cs.iter().find(|c| c.id == id))
                .map(|c| c.name.clone())
                .unwrap_or_else(|| format!("course {}", id)),
        }
    }

    /// Step the course filter through: all -> each course in order -> all.
    fn cycle_filter(&mut self, courses: &[Course]) {
        self.filter = match self.filter {
            CourseFilter::All => match courses.first() {
                Some(c) => CourseFilter::Course(c.id),
                None => CourseFilter::All,
            },
            CourseFilter::Course(id) => match courses.iter().position(|c| c.id == id) {
                Some(i) if i + 1 < courses.len() => CourseFilter::Course(courses[i + 1].id),
                _ => CourseFilter::All,
            },
        };
    }
}
