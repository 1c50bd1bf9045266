use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Clear, Paragraph},
};
use roster_api::{
    course::Course,
    student::{validate_email, validate_name, Student},
};

use crate::{store::StudentDraft, styles};

/// Which form field has the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Email,
    Course,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Course,
            Field::Course => Field::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            Field::Name => Field::Course,
            Field::Email => Field::Name,
            Field::Course => Field::Email,
        }
    }
}

/// What the form wants done after a key press.
pub enum FormOutcome {
    /// Keep the form open
    Open,

    /// Close without touching the roster
    Cancel,

    /// Close and apply: `Some(id)` updates that student, `None` adds a new one
    Submit(Option<String>, StudentDraft),
}

/// Modal add/edit form for a single student.
///
/// Holds a snapshot of the course catalog from when it was opened, so a
/// reload landing mid-edit can't shift the selector under the user.
pub struct StudentForm {
    editing: Option<String>,
    name: String,
    email: String,
    course_idx: usize,
    courses: Vec<Course>,
    profile_image: Option<String>,
    field: Field,
    error: Option<String>,
}

impl StudentForm {
    /// Form for a brand new student. `courses` must be non-empty.
    pub fn add(courses: Vec<Course>) -> Self {
        Self {
            editing: None,
            name: String::new(),
            email: String::new(),
            course_idx: 0,
            courses,
            profile_image: None,
            field: Field::Name,
            error: None,
        }
    }

    /// Form pre-filled from an existing student.
    pub fn edit(student: &Student, courses: Vec<Course>) -> Self {
        let course_idx = courses
            .iter()
            .position(|c| c.id == student.course_id)
            .unwrap_or(0);

        Self {
            editing: Some(student.id.clone()),
            name: student.name.clone(),
            email: student.email.clone(),
            course_idx,
            courses,
            profile_image: student.profile_image.clone(),
            field: Field::Name,
            error: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match key.code {
            KeyCode::Esc => return FormOutcome::Cancel,
            KeyCode::Tab | KeyCode::Down => self.field = self.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.previous(),
            KeyCode::Enter => return self.submit(),
            KeyCode::Char(c) => match self.field {
                Field::Name => self.name.push(c),
                Field::Email => self.email.push(c),
                Field::Course => (),
            },
            KeyCode::Backspace => match self.field {
                Field::Name => {
                    self.name.pop();
                }
                Field::Email => {
                    self.email.pop();
                }
                Field::Course => (),
            },
            KeyCode::Left if self.field == Field::Course => {
                self.course_idx = match self.course_idx {
                    0 => self.courses.len() - 1,
                    i => i - 1,
                };
            }
            KeyCode::Right if self.field == Field::Course => {
                self.course_idx = (self.course_idx + 1) % self.courses.len();
            }
            _ => (),
        };

        FormOutcome::Open
    }

    fn submit(&mut self) -> FormOutcome {
        if !validate_name(&self.name) {
            self.error = Some("name can't be blank".to_string());
            return FormOutcome::Open;
        }
        if !validate_email(self.email.trim()) {
            self.error = Some("that doesn't look like an email address".to_string());
            return FormOutcome::Open;
        }

        FormOutcome::Submit(
            self.editing.clone(),
            StudentDraft {
                name: self.name.trim().to_string(),
                email: self.email.trim().to_string(),
                course_id: self.courses[self.course_idx].id,
                profile_image: self.profile_image.clone(),
            },
        )
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = modal_area(frame.size());
        frame.render_widget(Clear, area);

        let marker = |field| if self.field == field { ">" } else { " " };
        let mut lines = vec![
            Line::raw(format!("{} Name:   {}", marker(Field::Name), self.name)),
            Line::raw(format!("{} Email:  {}", marker(Field::Email), self.email)),
            Line::raw(format!(
                "{} Course: < {} >",
                marker(Field::Course),
                self.courses[self.course_idx].name
            )),
            Line::raw(""),
        ];
        if let Some(e) = &self.error {
            lines.extend(styles::error_text(e.clone()).lines);
        } else {
            lines.extend(styles::dim_text("enter: save  esc: cancel  tab: next field").lines);
        }

        let title = match self.editing {
            Some(_) => "Edit student",
            None => "Add student",
        };
        frame.render_widget(
            Paragraph::new(lines).block(styles::pane_block(title, true)),
            area,
        );
    }
}

/// A small centered rectangle for the modal, clamped to the frame.
fn modal_area(size: Rect) -> Rect {
    let width = 50.min(size.width);
    let height = 8.min(size.height);
    Rect {
        x: (size.width - width) / 2,
        y: (size.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut StudentForm, s: &str) {
        for c in s.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn courses() -> Vec<Course> {
        vec![
            Course {
                id: 1,
                name: "Mathematics".to_string(),
            },
            Course {
                id: 2,
                name: "Physics".to_string(),
            },
        ]
    }

    #[test]
    fn test_submit_rejects_bad_email() {
        let mut form = StudentForm::add(courses());
        type_str(&mut form, "Om Patel");
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "a@b");

        assert!(matches!(form.handle_key(key(KeyCode::Enter)), FormOutcome::Open));
        assert!(form.error.is_some());
    }

    #[test]
    fn test_submit_produces_draft() {
        let mut form = StudentForm::add(courses());
        type_str(&mut form, "Om Patel");
        form.handle_key(key(KeyCode::Tab));
        type_str(&mut form, "om.patel@gmail.com");
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Right)); // Mathematics -> Physics

        let FormOutcome::Submit(editing, draft) = form.handle_key(key(KeyCode::Enter)) else {
            panic!("expected submit");
        };
        assert_eq!(editing, None);
        assert_eq!(
            draft,
            StudentDraft {
                name: "Om Patel".to_string(),
                email: "om.patel@gmail.com".to_string(),
                course_id: 2,
                profile_image: None,
            }
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut form = StudentForm::add(courses());
        assert!(matches!(form.handle_key(key(KeyCode::Esc)), FormOutcome::Cancel));
    }

    #[test]
    fn test_course_selector_wraps() {
        let mut form = StudentForm::add(courses());
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab)); // on the course field
        form.handle_key(key(KeyCode::Left));
        assert_eq!(form.course_idx, 1);
        form.handle_key(key(KeyCode::Right));
        assert_eq!(form.course_idx, 0);
    }
}
