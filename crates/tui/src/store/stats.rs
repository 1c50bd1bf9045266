use chrono::{DateTime, Duration, Utc};
use roster_api::{course::Course, student::Student};

/// Headline numbers for the dashboard.
///
/// A pure projection: derive it again from the same roster, catalog and
/// clock reading and you get the same answers. No counters are kept
/// anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total_students: usize,
    pub total_courses: usize,

    /// Students created within the trailing 30 days of `now`.
    pub recent_enrollments: usize,

    /// Students per course, rounded to the nearest integer. Defined as 0
    /// when there are no courses.
    pub avg_students_per_course: u32,
}

impl Stats {
    pub fn derive(students: &[Student], courses: &[Course], now: DateTime<Utc>) -> Self {
        let cutoff = now - Duration::days(30);
        let recent_enrollments = students.iter().filter(|s| s.created_at > cutoff).count();

        let avg_students_per_course = if courses.is_empty() {
            0
        } else {
            (students.len() as f64 / courses.len() as f64).round() as u32
        };

        Self {
            total_students: students.len(),
            total_courses: courses.len(),
            recent_enrollments,
            avg_students_per_course,
        }
    }
}
