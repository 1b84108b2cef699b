use serde::Serialize;
use std::fmt;

pub use crate::entities::bugs::DEFAULT_STATUS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BugId(pub i32);

impl fmt::Display for BugId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bug {
    pub id: BugId,
    pub title: String,
    pub description: String,
    pub tag: Option<String>,
    pub status: String,
    pub reported_by: String,
    pub created_at: String,
}

/// A validated report waiting to be attributed and stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBug {
    pub title: String,
    pub description: String,
    pub tag: Option<String>,
}
