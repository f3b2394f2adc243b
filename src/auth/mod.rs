//! Teacher authentication.
//!
//! Login names are matched case-insensitively, ignoring surrounding
//! whitespace, and with or without a recognized honorific: a teacher stored
//! as `mr.jones` may log in as `jones`, `Jones` or `Mr.Jones`.

use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::debug;

pub mod store;

pub use store::{CachedTeacherStore, FileTeacherStore, TeacherStore};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
}

#[derive(Clone, Deserialize)]
pub struct TeacherRecord {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for TeacherRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeacherRecord")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Shape of the credential document: `{"teachers": [{"username", "password"}]}`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TeacherTable {
    pub teachers: Vec<TeacherRecord>,
}

impl TeacherTable {
    /// Normalized username to password. Later duplicates win.
    fn lookup(&self) -> HashMap<String, &str> {
        self.teachers
            .iter()
            .map(|t| (normalize(&t.username), t.password.as_str()))
            .collect()
    }
}

/// Identity of an authenticated teacher: the normalized login candidate that
/// matched a stored record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TeacherId(String);

impl TeacherId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TeacherId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Honorific {
    Mr,
    Mrs,
}

impl Honorific {
    /// Candidate order after the bare name.
    pub const ALL: [Honorific; 2] = [Honorific::Mr, Honorific::Mrs];

    pub fn prefix(self) -> &'static str {
        match self {
            Honorific::Mr => "mr.",
            Honorific::Mrs => "mrs.",
        }
    }
}

fn normalize(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Strips a single leading honorific from an already normalized name.
fn base_name(normalized: &str) -> &str {
    Honorific::ALL
        .iter()
        .find_map(|h| normalized.strip_prefix(h.prefix()))
        .unwrap_or(normalized)
}

/// Login names tried for `username`, in match priority order: the bare name,
/// then one per honorific.
pub fn candidates(username: &str) -> [String; 3] {
    let normalized = normalize(username);
    let base = base_name(&normalized);

    [
        base.to_owned(),
        format!("{}{}", Honorific::Mr.prefix(), base),
        format!("{}{}", Honorific::Mrs.prefix(), base),
    ]
}

pub fn authenticate(
    username: &str,
    password: &str,
    table: &TeacherTable,
) -> Result<TeacherId, AuthError> {
    let lookup = table.lookup();

    for candidate in candidates(username) {
        let Some(stored) = lookup.get(&candidate) else {
            continue;
        };

        if bool::from(password.as_bytes().ct_eq(stored.as_bytes())) {
            debug!(candidate = %candidate, "Teacher authenticated");
            return Ok(TeacherId(candidate));
        }

        debug!(candidate = %candidate, "Password mismatch");
    }

    Err(AuthError::InvalidCredentials)
}
