//! Task records flowing through the engine.
//!
//! `TaskInput` is what callers submit, `NormalizedTask` is the validated
//! internal record, and `ScoredTask` / `SuggestedTask` are what comes back.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Positional identifier of a task within one submitted batch.
pub type TaskId = usize;

/// Wire date format for `due_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A task as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    pub title: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub due_date: String,
    pub estimated_hours: f64,
    /// 1-10.
    pub importance: i64,
    /// Ids (batch positions) of tasks this one depends on.
    #[serde(default)]
    pub dependencies: Vec<i64>,
}

impl TaskInput {
    pub fn new(
        title: impl Into<String>,
        due_date: NaiveDate,
        estimated_hours: f64,
        importance: i64,
    ) -> Self {
        Self {
            title: title.into(),
            due_date: due_date.format(DATE_FORMAT).to_string(),
            estimated_hours,
            importance,
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = i64>) -> Self {
        self.dependencies = deps.into_iter().collect();
        self
    }
}

/// Validated task record with its batch position assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTask {
    pub id: TaskId,
    pub title: String,
    pub due_date: NaiveDate,
    pub estimated_hours: f64,
    pub importance: u8,
    /// In-batch dependencies, sorted and deduplicated.
    pub dependencies: Vec<TaskId>,
    /// Dependency ids that referred to nothing in the batch.
    pub dropped_dependencies: Vec<i128>,
}

impl NormalizedTask {
    /// Days from `today` until the due date; negative when overdue.
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }
}

/// The four independent scoring factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Urgency,
    Importance,
    Effort,
    Dependencies,
}

impl Factor {
    /// Tie-break order when two factors contribute equally.
    pub const PRECEDENCE: [Factor; 4] = [
        Factor::Urgency,
        Factor::Dependencies,
        Factor::Importance,
        Factor::Effort,
    ];
}

/// Per-factor scores, each in 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependencies: f64,
}

impl ScoreComponents {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Urgency => self.urgency,
            Factor::Importance => self.importance,
            Factor::Effort => self.effort,
            Factor::Dependencies => self.dependencies,
        }
    }

    /// Output form: two decimals, with effort kept at or above 0.01 since the
    /// effort curve never reaches zero.
    pub(crate) fn rounded(self) -> Self {
        Self {
            urgency: round2(self.urgency),
            importance: round2(self.importance),
            effort: round2(self.effort).max(MIN_EFFORT_SCORE),
            dependencies: round2(self.dependencies),
        }
    }
}

/// A task with its priority attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    pub id: TaskId,
    pub title: String,
    pub due_date: NaiveDate,
    pub estimated_hours: f64,
    pub importance: u8,
    pub dependencies: Vec<TaskId>,
    pub priority_score: f64,
    pub score_components: ScoreComponents,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// A scored task picked into the top-N suggestion list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedTask {
    #[serde(flatten)]
    pub task: ScoredTask,
    /// 1-based.
    pub rank: usize,
    pub suggestion_reason: String,
}

/// Smallest effort score reported after rounding.
const MIN_EFFORT_SCORE: f64 = 0.01;

/// Round to two decimals for output.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_input_deserializes_without_dependencies() {
        let json = r#"{"title":"Write report","due_date":"2026-03-01","estimated_hours":2,"importance":6}"#;
        let task: TaskInput = serde_json::from_str(json).unwrap();
        assert!(task.dependencies.is_empty());
        assert_eq!(task.importance, 6);
    }

    #[test]
    fn test_scored_task_omits_empty_warning() {
        let task = ScoredTask {
            id: 0,
            title: "Plan".into(),
            due_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            estimated_hours: 1.0,
            importance: 5,
            dependencies: vec![],
            priority_score: 50.0,
            score_components: ScoreComponents::default(),
            explanation: "Balanced priority".into(),
            warning: None,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("warning").is_none());
        assert_eq!(json["due_date"], "2026-03-01");
    }

    #[test]
    fn test_suggested_task_flattens_fields() {
        let task = ScoredTask {
            id: 3,
            title: "Ship".into(),
            due_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            estimated_hours: 1.0,
            importance: 5,
            dependencies: vec![],
            priority_score: 50.0,
            score_components: ScoreComponents::default(),
            explanation: "Due in 9 days".into(),
            warning: Some("circular dependency detected".into()),
        };
        let suggested = SuggestedTask {
            task,
            rank: 1,
            suggestion_reason: "Rank #1: Due in 9 days".into(),
        };
        let json = serde_json::to_value(&suggested).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["rank"], 1);
        assert_eq!(json["warning"], "circular dependency detected");
    }

    #[test]
    fn test_rounded_effort_never_zero() {
        let components = ScoreComponents {
            urgency: 10.0,
            importance: 1.0,
            effort: 0.004,
            dependencies: 0.0,
        };
        let rounded = components.rounded();
        assert_eq!(rounded.effort, 0.01);
        assert_eq!(rounded.dependencies, 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(63.8537), 63.85);
        assert_eq!(round2(100.0), 100.0);
    }
}
