use roster_api::student::Student;

/// Course half of the roster filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourseFilter {
    /// Match every student regardless of course
    #[default]
    All,

    /// Only students enrolled in the given course
    Course(u32),
}

impl CourseFilter {
    fn matches(&self, student: &Student) -> bool {
        match self {
            CourseFilter::All => true,
            CourseFilter::Course(id) => student.course_id == *id,
        }
    }
}

/// Students whose name or email contains `query` (case-insensitive) and who
/// pass the course filter. Preserves roster order and leaves the input
/// untouched; an empty query matches everyone.
pub fn filter_students<'a>(
    students: &'a [Student],
    query: &str,
    filter: CourseFilter,
) -> Vec<&'a Student> {
    let query = query.to_lowercase();

    students
        .iter()
        .filter(|s| filter.matches(s))
        .filter(|s| {
            s.name.to_lowercase().contains(&query) || s.email.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn roster() -> Vec<Student> {
        let student = |name: &str, email: &str, course_id| Student {
            id: name.to_lowercase().replace(' ', "."),
            name: name.to_string(),
            email: email.to_string(),
            course_id,
            profile_image: None,
            created_at: Utc::now(),
        };

        vec![
            student("Rajesh Patil", "rajesh.patil@gmail.com", 1),
            student("Om Patel", "om.patel@gmail.com", 2),
        ]
    }

    fn names(students: &[&Student]) -> Vec<String> {
        students.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let roster = roster();
        let found = filter_students(&roster, "pat", CourseFilter::All);

        assert_eq!(
            names(&found),
            vec!["Rajesh Patil".to_string(), "Om Patel".to_string()]
        );
    }

    #[test]
    fn test_course_filter_narrows_matches() {
        let roster = roster();
        let found = filter_students(&roster, "pat", CourseFilter::Course(1));

        assert_eq!(names(&found), vec!["Rajesh Patil".to_string()]);
    }

    #[test]
    fn test_search_matches_email_too() {
        let roster = roster();
        let found = filter_students(&roster, "om.patel@", CourseFilter::All);

        assert_eq!(names(&found), vec!["Om Patel".to_string()]);
    }

    #[test]
    fn test_empty_query_matches_everyone() {
        let roster = roster();
        assert_eq!(filter_students(&roster, "", CourseFilter::All).len(), 2);
    }

    #[test]
    fn test_no_match_is_empty_not_an_error() {
        let roster = roster();
        assert!(filter_students(&roster, "zzz", CourseFilter::All).is_empty());
        assert!(filter_students(&roster, "pat", CourseFilter::Course(99)).is_empty());
    }

    #[test]
    fn test_input_is_not_mutated() {
        let roster = roster();
        let before: Vec<String> = roster.iter().map(|s| s.id.clone()).collect();

        let _ = filter_students(&roster, "a", CourseFilter::All);

        let after: Vec<String> = roster.iter().map(|s| s.id.clone()).collect();
        assert_eq!(before, after);
    }
}
