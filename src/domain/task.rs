//! Task record and identifier types
//!
//! Tasks are keyed by a caller-supplied identifier. The identifier is
//! normalised once, at whichever entry point it arrives through, so a task
//! created as `1` is the same task addressed later as `"1"`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Canonical task identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum TaskId {
    /// Integer ids, whether supplied as a JSON number or as digits in text
    Int(i64),
    /// Any other non-empty text
    Text(String),
}

impl TaskId {
    /// Normalise a JSON value into an identifier.
    ///
    /// Returns `None` for values that cannot be identifiers: null, booleans,
    /// non-integer numbers, empty text, arrays and objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            // Integers past i64::MAX get the same Text form their digits would
            Value::Number(n) if n.is_u64() && n.as_i64().is_none() => Some(TaskId::Text(n.to_string())),
            Value::Number(n) => n.as_i64().map(TaskId::Int),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl FromStr for TaskId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdParseError);
        }
        Ok(match s.parse::<i64>() {
            Ok(n) => TaskId::Int(n),
            Err(_) => TaskId::Text(s.to_string()),
        })
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Int(n) => write!(f, "{}", n),
            TaskId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TaskId {
    fn from(n: i64) -> Self {
        TaskId::Int(n)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        TaskId::from_value(&value)
            .ok_or_else(|| D::Error::custom("task id must be an integer or non-empty string"))
    }
}

/// Empty text cannot name a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("task id must not be empty")]
pub struct IdParseError;

/// A stored task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed,
        }
    }
}

/// Fields to overwrite on an existing task; `None` leaves the field alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// True when applying this patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }

    /// Overwrite only the fields present in the patch
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_text_and_number_are_same_id() {
        let from_number = TaskId::from_value(&json!(1)).unwrap();
        let from_text = TaskId::from_value(&json!("1")).unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(from_number, TaskId::Int(1));
    }

    #[test]
    fn test_text_id_kept_as_text() {
        let id: TaskId = "abc".parse().unwrap();
        assert_eq!(id, TaskId::Text("abc".to_string()));
        assert_eq!(id.to_string(), "abc");
    }

    #[test]
    fn test_rejected_id_values() {
        for value in [json!(null), json!(true), json!(1.5), json!(""), json!([1]), json!({})] {
            assert!(TaskId::from_value(&value).is_none(), "{} should be rejected", value);
        }
    }

    #[test]
    fn test_large_integer_matches_its_text_form() {
        let from_number = TaskId::from_value(&json!(u64::MAX)).unwrap();
        let from_text = TaskId::from_value(&json!(u64::MAX.to_string())).unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(from_number, TaskId::Text("18446744073709551615".to_string()));
        assert_eq!(TaskId::from_value(&json!(i64::MAX)), Some(TaskId::Int(i64::MAX)));
    }

    #[test]
    fn test_zero_is_a_valid_id() {
        assert_eq!(TaskId::from_value(&json!(0)), Some(TaskId::Int(0)));
    }

    #[test]
    fn test_task_id_serializes_in_native_shape() {
        assert_eq!(serde_json::to_value(TaskId::Int(3)).unwrap(), json!(3));
        assert_eq!(serde_json::to_value(TaskId::Text("x".into())).unwrap(), json!("x"));
    }

    #[test]
    fn test_task_deserialize_normalizes_id() {
        let task: Task = serde_json::from_value(json!({"id": "42", "title": "A", "completed": false})).unwrap();
        assert_eq!(task.id, TaskId::Int(42));
    }

    #[test]
    fn test_patch_only_completed_keeps_title() {
        let mut task = Task::new(1, "A", false);
        let patch = TaskPatch {
            title: None,
            completed: Some(true),
        };
        patch.apply(&mut task);
        assert_eq!(task.title, "A");
        assert!(task.completed);
    }

    #[test]
    fn test_patch_only_title_keeps_completed() {
        let mut task = Task::new(1, "A", true);
        let patch = TaskPatch {
            title: Some("B".to_string()),
            completed: None,
        };
        patch.apply(&mut task);
        assert_eq!(task.title, "B");
        assert!(task.completed);
    }

    #[test]
    fn test_empty_patch() {
        assert!(TaskPatch::default().is_empty());
    }
}
