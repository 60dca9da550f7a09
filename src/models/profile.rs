use serde::{Deserialize, Serialize};

/// User profile record. Stored under its own key and never touched by
/// the task engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub username: String,
    pub age: Option<u32>,
    pub bio: Option<String>,
}
