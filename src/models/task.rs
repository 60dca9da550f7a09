use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PensumError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Display weight only; priority has no scheduling effect.
    pub fn weight(&self) -> i32 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

/// The fixed category set offered at the input boundary. `Other` is a
/// placeholder: validation substitutes the user-supplied label for it,
/// so a stored task always carries a resolved label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryChoice {
    Study,
    Project,
    Exam,
    Exercise,
    Other,
}

impl CategoryChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Study => "study",
            Self::Project => "project",
            Self::Exam => "exam",
            Self::Exercise => "exercise",
            Self::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "study" => Some(Self::Study),
            "project" => Some(Self::Project),
            "exam" => Some(Self::Exam),
            "exercise" => Some(Self::Exercise),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub priority: Priority,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Opaque reference to the pending reminder, if one was scheduled.
    pub notification_handle: Option<String>,
}

impl Task {
    /// Time-classification relative to `now`. Pure; callers must pass the
    /// clock explicitly and recompute on every read.
    pub fn classify(&self, now: DateTime<Utc>) -> Classification {
        Classification {
            ended: self.end_time < now,
            in_progress: !self.completed && now >= self.start_time && now <= self.end_time,
            due: self.completed || self.start_time <= now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub ended: bool,
    pub in_progress: bool,
    pub due: bool,
}

/// Editable draft of a task. The canonical record is never mutated until
/// a draft has passed validation.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub category: CategoryChoice,
    pub custom_category: Option<String>,
    pub priority: Priority,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Edit,
}

/// A draft that passed validation, with the category label resolved.
#[derive(Debug, Clone)]
pub struct ValidatedDraft {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub priority: Priority,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Validate a draft. `Create` additionally requires a future start time;
/// `Edit` skips that check so an in-progress task stays editable.
pub fn validate(
    draft: &TaskDraft,
    mode: ValidationMode,
    now: DateTime<Utc>,
) -> Result<ValidatedDraft, PensumError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(PensumError::validation("Task title is required"));
    }

    let category = match draft.category {
        CategoryChoice::Other => {
            let label = draft.custom_category.as_deref().unwrap_or("").trim();
            if label.is_empty() {
                return Err(PensumError::validation(
                    "A custom category label is required when category is 'other'",
                ));
            }
            label.to_string()
        }
        choice => choice.as_str().to_string(),
    };

    if draft.end_time <= draft.start_time {
        return Err(PensumError::validation("End time must be after start time"));
    }

    if mode == ValidationMode::Create && draft.start_time <= now {
        return Err(PensumError::validation("Start time must be in the future"));
    }

    Ok(ValidatedDraft {
        title: title.to_string(),
        description: draft.description.clone(),
        category,
        priority: draft.priority,
        start_time: draft.start_time,
        end_time: draft.end_time,
    })
}
