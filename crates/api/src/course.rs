use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: u32,
    pub name: String,
}

impl Course {
    fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }

    /// The fixed catalog a successful fetch returns. Ids are unique and
    /// stable across calls.
    pub fn catalog() -> Vec<Course> {
        vec![
            Course::new(1, "Mathematics"),
            Course::new(2, "Physics"),
            Course::new(3, "Chemistry"),
            Course::new(4, "Biology"),
            Course::new(5, "Computer Science"),
            Course::new(6, "English Literature"),
        ]
    }
}
