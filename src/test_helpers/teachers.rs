use crate::auth::{self, TeacherId, TeacherTable};

pub const JONES_PASSWORD: &str = "checkmate";
pub const SMITH_PASSWORD: &str = "quadratic";
pub const GARCIA_PASSWORD: &str = "encore";

pub const DOCUMENT: &str = r#"
{
    "teachers": [
        {"username": "mr.jones", "password": "checkmate"},
        {"username": "mrs.smith", "password": "quadratic"},
        {"username": "Ms.Garcia", "password": "encore"}
    ]
}
"#;

pub fn table() -> TeacherTable {
    serde_json::from_str(DOCUMENT).expect("Failed to parse teachers document")
}

pub fn jones() -> TeacherId {
    auth::authenticate("jones", JONES_PASSWORD, &table()).expect("Failed to authenticate jones")
}
