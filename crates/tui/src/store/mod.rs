use chrono::Utc;
use log::debug;
use roster_api::{course::Course, student::Student};
use std::{collections::HashMap, sync::mpsc::Sender};

mod filter;
mod stats;
mod worker;
pub use filter::{filter_students, CourseFilter};
pub use stats::Stats;
pub use worker::Worker;

/// Lifecycle of the course catalog fetch, as seen by the UI.
///
/// Exactly one of these holds at any instant. Entering `Loading` drops any
/// previous courses or error: a fetch is all-or-nothing, so we never show
/// stale courses next to a spinner or an error. (The alternative, keeping
/// old courses visible during a reload, was considered and rejected to keep
/// this enum single-valued.)
#[derive(Debug, Clone, PartialEq)]
pub enum CoursesState {
    /// Nothing requested yet
    Idle,

    /// Request in flight
    Loading,

    /// Last fetch succeeded
    Ready(Vec<Course>),

    /// Last fetch failed; retrying is always possible from here
    Error(String),
}

/// Requests sent to the worker thread
#[derive(Debug)]
pub enum LoadRequest {
    Courses { generation: u64 },
    CourseDetail { id: u32 },
}

/// Messages received by the app from the worker thread
#[derive(Debug)]
pub enum Event {
    Courses {
        generation: u64,
        result: Result<Vec<Course>, roster_api::Error>,
    },
    CourseDetail {
        id: u32,
        course: Option<Course>,
    },
}

/// What the add/edit form produces. The store owns ids and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub email: String,
    pub course_id: u32,
    pub profile_image: Option<String>,
}

/// Global data store: the course fetch state machine plus the in-memory
/// student roster.
pub struct Store {
    courses: CoursesState,

    /// Bumped on every [`Store::load_courses`]. Results tagged with an older
    /// generation lost the race against a newer request and are dropped.
    generation: u64,

    /// Single-course lookups that have come back. `Some(None)` means the
    /// backend answered "no such course".
    course_details: HashMap<u32, Option<Course>>,

    students: Vec<Student>,
    next_student_id: u32,

    worker_channel: Sender<LoadRequest>,
}

impl Store {
    pub fn new(worker_channel: Sender<LoadRequest>) -> Self {
        Self {
            courses: CoursesState::Idle,
            generation: 0,
            course_details: Default::default(),
            students: Vec::new(),
            next_student_id: 1,
            worker_channel,
        }
    }

    pub fn courses_state(&self) -> &CoursesState {
        &self.courses
    }

    /// Courses from the last successful fetch, if we're in `Ready`.
    pub fn courses(&self) -> Option<&[Course]> {
        match &self.courses {
            CoursesState::Ready(courses) => Some(courses.as_slice()),
            _ => None,
        }
    }

    /// Kick off a (re)load of the course catalog. Also the retry action.
    ///
    /// Moves to `Loading` before the worker ever sees the request, so the UI
    /// can't observe a gap between asking and the state changing. Calling
    /// again while a request is already in flight is fine: each call bumps
    /// the generation, and whatever the older request eventually delivers is
    /// dropped in [`Store::event`].
    pub fn load_courses(&mut self) {
        self.generation += 1;
        self.courses = CoursesState::Loading;
        self.worker_channel
            .send(LoadRequest::Courses {
                generation: self.generation,
            })
            .unwrap()
    }

    /// Cached result of a single-course lookup, if it has come back yet.
    pub fn course_detail(&self, id: u32) -> Option<&Option<Course>> {
        self.course_details.get(&id)
    }

    pub fn request_course_detail(&self, id: u32) {
        self.worker_channel
            .send(LoadRequest::CourseDetail { id })
            .unwrap()
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Append a new student to the roster, stamping id and creation time.
    pub fn add_student(&mut self, draft: StudentDraft) -> &Student {
        let id = format!("s{}", self.next_student_id);
        self.next_student_id += 1;

        self.students.push(Student {
            id,
            name: draft.name,
            email: draft.email,
            course_id: draft.course_id,
            profile_image: draft.profile_image,
            created_at: Utc::now(),
        });

        self.students.last().unwrap()
    }

    /// Overwrite an existing student's details, keeping id and creation
    /// time. Returns false if no student has that id.
    pub fn update_student(&mut self, id: &str, draft: StudentDraft) -> bool {
        let Some(student) = self.students.iter_mut().find(|s| s.id == id) else {
            return false;
        };

        student.name = draft.name;
        student.email = draft.email;
        student.course_id = draft.course_id;
        student.profile_image = draft.profile_image;
        true
    }

    /// Returns false if no student has that id.
    pub fn remove_student(&mut self, id: &str) -> bool {
        let before = self.students.len();
        self.students.retain(|s| s.id != id);
        self.students.len() != before
    }

    /// Apply a worker event to the store.
    pub fn event(&mut self, e: Event) {
        match e {
            Event::Courses { generation, result } => {
                if generation != self.generation {
                    debug!(
                        "dropping result of superseded fetch {} (now at {})",
                        generation, self.generation
                    );
                    return;
                }

                self.courses = match result {
                    Ok(courses) => CoursesState::Ready(courses),
                    Err(e) => CoursesState::Error(e.to_string()),
                };
            }
            Event::CourseDetail { id, course } => {
                self.course_details.insert(id, course);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::mpsc::{channel, Receiver};

    fn test_store() -> (Store, Receiver<LoadRequest>) {
        let (send, recv) = channel();
        (Store::new(send), recv)
    }

    fn draft(name: &str, email: &str, course_id: u32) -> StudentDraft {
        StudentDraft {
            name: name.to_string(),
            email: email.to_string(),
            course_id,
            profile_image: None,
        }
    }

    #[test]
    fn test_load_transitions_to_loading_synchronously() {
        let (mut store, recv) = test_store();
        assert_eq!(*store.courses_state(), CoursesState::Idle);

        store.load_courses();

        assert_eq!(*store.courses_state(), CoursesState::Loading);
        assert!(matches!(
            recv.try_recv().unwrap(),
            LoadRequest::Courses { generation: 1 }
        ));
    }

    #[test]
    fn test_successful_fetch_lands_in_ready() {
        let (mut store, _recv) = test_store();
        store.load_courses();

        store.event(Event::Courses {
            generation: 1,
            result: Ok(Course::catalog()),
        });

        assert_eq!(*store.courses_state(), CoursesState::Ready(Course::catalog()));
        assert_eq!(store.courses().unwrap().len(), Course::catalog().len());
    }

    #[test]
    fn test_failed_fetch_lands_in_error_with_message() {
        let (mut store, _recv) = test_store();
        store.load_courses();

        store.event(Event::Courses {
            generation: 1,
            result: Err(roster_api::Error::Network(
                "unable to fetch courses".to_string(),
            )),
        });

        assert_eq!(
            *store.courses_state(),
            CoursesState::Error("network error: unable to fetch courses".to_string())
        );
        assert_eq!(store.courses(), None);
    }

    #[test]
    fn test_reload_clears_previous_courses_and_errors() {
        let (mut store, _recv) = test_store();
        store.load_courses();
        store.event(Event::Courses {
            generation: 1,
            result: Ok(Course::catalog()),
        });

        store.load_courses();
        assert_eq!(*store.courses_state(), CoursesState::Loading);
        assert_eq!(store.courses(), None);
    }

    #[test]
    fn test_superseded_fetch_results_are_dropped() {
        let (mut store, _recv) = test_store();
        store.load_courses();
        store.load_courses(); // second request before the first lands

        // first request's result arrives late and loses
        store.event(Event::Courses {
            generation: 1,
            result: Err(roster_api::Error::Network("boom".to_string())),
        });
        assert_eq!(*store.courses_state(), CoursesState::Loading);

        // the current request's result wins
        store.event(Event::Courses {
            generation: 2,
            result: Ok(Course::catalog()),
        });
        assert_eq!(*store.courses_state(), CoursesState::Ready(Course::catalog()));
    }

    #[test]
    fn test_retry_from_error_is_just_another_load() {
        let (mut store, _recv) = test_store();
        store.load_courses();
        store.event(Event::Courses {
            generation: 1,
            result: Err(roster_api::Error::Network("boom".to_string())),
        });

        store.load_courses();
        assert_eq!(*store.courses_state(), CoursesState::Loading);

        store.event(Event::Courses {
            generation: 2,
            result: Ok(Course::catalog()),
        });
        assert!(matches!(store.courses_state(), CoursesState::Ready(_)));
    }

    #[test]
    fn test_roster_add_update_remove() {
        let (mut store, _recv) = test_store();

        let id = store
            .add_student(draft("Rajesh Patil", "rajesh.patil@gmail.com", 1))
            .id
            .clone();
        store.add_student(draft("Om Patel", "om.patel@gmail.com", 2));
        assert_eq!(store.students().len(), 2);

        assert!(store.update_student(&id, draft("Rajesh Patil", "rajesh@outlook.com", 2)));
        let updated = store.students().iter().find(|s| s.id == id).unwrap();
        assert_eq!(updated.email, "rajesh@outlook.com");
        assert_eq!(updated.course_id, 2);

        assert!(store.remove_student(&id));
        assert!(!store.remove_student(&id));
        assert_eq!(store.students().len(), 1);
    }

    #[test]
    fn test_course_detail_cache() {
        let (mut store, recv) = test_store();

        assert_eq!(store.course_detail(3), None);
        store.request_course_detail(3);
        assert!(matches!(
            recv.try_recv().unwrap(),
            LoadRequest::CourseDetail { id: 3 }
        ));

        store.event(Event::CourseDetail { id: 3, course: None });
        assert_eq!(store.course_detail(3), Some(&None));
    }
}
