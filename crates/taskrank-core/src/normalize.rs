//! Batch normalizer.
//!
//! Validates a raw task list and turns it into `NormalizedTask` records whose
//! ids are their positions in the batch. Any invalid field rejects the whole
//! batch; dependency ids that point outside the batch are only dropped.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::task::{NormalizedTask, TaskId, TaskInput, DATE_FORMAT};

/// Longest accepted title, in characters, after trimming.
pub const MAX_TITLE_LEN: usize = 255;

/// Fields of one task after per-field validation, before dependency resolution.
struct Draft {
    title: String,
    due_date: NaiveDate,
    estimated_hours: f64,
    importance: u8,
    dependencies: Vec<i128>,
}

/// Normalize a batch of typed inputs.
pub fn normalize_inputs(tasks: &[TaskInput]) -> Result<Vec<NormalizedTask>, ValidationError> {
    let drafts = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            Ok(Draft {
                title: check_title(index, &task.title)?,
                due_date: check_due_date(index, &task.due_date)?,
                estimated_hours: check_hours(index, task.estimated_hours)?,
                importance: check_importance(index, task.importance)?,
                dependencies: task.dependencies.iter().map(|&d| i128::from(d)).collect(),
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(resolve(drafts))
}

/// Normalize a batch straight from its JSON form.
///
/// `tasks` must be an array of objects. Type mismatches are reported per
/// field rather than as a generic deserialization failure.
pub fn normalize_value(tasks: &Value) -> Result<Vec<NormalizedTask>, ValidationError> {
    let items = tasks.as_array().ok_or(ValidationError::NotAList)?;

    let drafts = items
        .iter()
        .enumerate()
        .map(|(index, item)| draft_from_value(index, item))
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(resolve(drafts))
}

fn draft_from_value(index: usize, item: &Value) -> Result<Draft, ValidationError> {
    let obj = item
        .as_object()
        .ok_or(ValidationError::NotAnObject { index })?;

    let title = required(obj, index, "title")?
        .as_str()
        .ok_or_else(|| invalid(index, "title", "must be a string"))?;

    let due_date = required(obj, index, "due_date")?
        .as_str()
        .ok_or_else(|| invalid(index, "due_date", "must be a date string (YYYY-MM-DD)"))?;

    let estimated_hours = required(obj, index, "estimated_hours")?
        .as_f64()
        .ok_or_else(|| invalid(index, "estimated_hours", "must be a number"))?;

    let importance = as_integer(required(obj, index, "importance")?)
        .ok_or_else(|| invalid(index, "importance", "must be an integer"))?;

    let dependencies = match obj.get("dependencies") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(deps)) => deps
            .iter()
            .map(|d| {
                as_dependency_id(d)
                    .ok_or_else(|| invalid(index, "dependencies", "entries must be integer task ids"))
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(invalid(index, "dependencies", "must be a list")),
    };

    Ok(Draft {
        title: check_title(index, title)?,
        due_date: check_due_date(index, due_date)?,
        estimated_hours: check_hours(index, estimated_hours)?,
        importance: check_importance(index, importance)?,
        dependencies,
    })
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<&'a Value, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField { index, field }),
        Some(v) => Ok(v),
    }
}

/// Assign positional ids and split dependencies into kept and dropped.
fn resolve(drafts: Vec<Draft>) -> Vec<NormalizedTask> {
    let len = drafts.len();
    drafts
        .into_iter()
        .enumerate()
        .map(|(id, draft)| {
            let mut dependencies: Vec<TaskId> = Vec::new();
            let mut dropped_dependencies: Vec<i128> = Vec::new();
            for dep in draft.dependencies {
                match usize::try_from(dep) {
                    Ok(dep_id) if dep_id < len => dependencies.push(dep_id),
                    _ => dropped_dependencies.push(dep),
                }
            }
            dependencies.sort_unstable();
            dependencies.dedup();
            dropped_dependencies.sort_unstable();
            dropped_dependencies.dedup();

            NormalizedTask {
                id,
                title: draft.title,
                due_date: draft.due_date,
                estimated_hours: draft.estimated_hours,
                importance: draft.importance,
                dependencies,
                dropped_dependencies,
            }
        })
        .collect()
}

fn check_title(index: usize, title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(invalid(index, "title", "must not be empty"));
    }
    let len = trimmed.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(invalid(
            index,
            "title",
            &format!("must be at most {MAX_TITLE_LEN} characters, got {len}"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Strict `YYYY-MM-DD`: the parsed date must format back to the exact input.
fn check_due_date(index: usize, due_date: &str) -> Result<NaiveDate, ValidationError> {
    let date = NaiveDate::parse_from_str(due_date, DATE_FORMAT).map_err(|e| {
        invalid(
            index,
            "due_date",
            &format!("expected YYYY-MM-DD, got '{due_date}' ({e})"),
        )
    })?;
    if date.format(DATE_FORMAT).to_string() != due_date {
        return Err(invalid(
            index,
            "due_date",
            &format!("expected YYYY-MM-DD, got '{due_date}'"),
        ));
    }
    Ok(date)
}

fn check_hours(index: usize, hours: f64) -> Result<f64, ValidationError> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(invalid(
            index,
            "estimated_hours",
            &format!("must be a positive number, got {hours}"),
        ));
    }
    Ok(hours)
}

fn check_importance(index: usize, importance: i64) -> Result<u8, ValidationError> {
    match u8::try_from(importance) {
        Ok(v) if (1..=10).contains(&v) => Ok(v),
        _ => Err(invalid(
            index,
            "importance",
            &format!("must be between 1 and 10, got {importance}"),
        )),
    }
}

/// Any JSON integer, signed or not, or a float with no fractional part.
///
/// Wide enough for every integer JSON carries; ids this large simply never
/// match a batch position.
fn as_dependency_id(value: &Value) -> Option<i128> {
    if let Some(n) = value.as_i64() {
        return Some(i128::from(n));
    }
    if let Some(n) = value.as_u64() {
        return Some(i128::from(n));
    }
    let f = value.as_f64()?;
    (f.is_finite() && f.fract() == 0.0).then_some(f as i128)
}

/// Accept JSON integers, and floats with no fractional part (`8.0`).
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn invalid(index: usize, field: &'static str, message: &str) -> ValidationError {
    ValidationError::InvalidValue {
        index,
        field,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task(title: &str) -> Value {
        json!({
            "title": title,
            "due_date": "2026-03-10",
            "estimated_hours": 2.5,
            "importance": 7,
        })
    }

    #[test]
    fn test_assigns_positional_ids_and_trims_title() {
        let batch = json!([task("  First  "), task("Second")]);
        let tasks = normalize_value(&batch).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, 0);
        assert_eq!(tasks[0].title, "First");
        assert_eq!(tasks[1].id, 1);
        assert!(tasks[1].dependencies.is_empty());
    }

    #[test]
    fn test_empty_batch_is_valid() {
        assert!(normalize_value(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_tasks_must_be_a_list() {
        assert_eq!(
            normalize_value(&json!({"title": "x"})),
            Err(ValidationError::NotAList)
        );
    }

    #[test]
    fn test_entry_must_be_object() {
        let err = normalize_value(&json!([task("ok"), 42])).unwrap_err();
        assert_eq!(err, ValidationError::NotAnObject { index: 1 });
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = normalize_value(&json!([task("ok"), task("   ")])).unwrap_err();
        assert_eq!(err.index(), Some(1));
        assert_eq!(err.field(), Some("title"));
    }

    #[test]
    fn test_overlong_title_rejected() {
        let long = "x".repeat(MAX_TITLE_LEN + 1);
        let err = normalize_value(&json!([task(&long)])).unwrap_err();
        assert_eq!(err.field(), Some("title"));
    }

    #[test]
    fn test_missing_due_date() {
        let mut t = task("No date");
        t.as_object_mut().unwrap().remove("due_date");
        let err = normalize_value(&json!([t])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                index: 0,
                field: "due_date"
            }
        );
    }

    #[test]
    fn test_unparseable_due_date() {
        let mut t = task("Bad date");
        t["due_date"] = json!("2026-02-30");
        let err = normalize_value(&json!([t])).unwrap_err();
        assert_eq!(err.field(), Some("due_date"));
    }

    #[test]
    fn test_non_positive_hours_rejected() {
        for hours in [json!(0), json!(-1.5)] {
            let mut t = task("Hours");
            t["estimated_hours"] = hours;
            let err = normalize_value(&json!([t])).unwrap_err();
            assert_eq!(err.field(), Some("estimated_hours"));
        }
    }

    #[test]
    fn test_importance_out_of_range_rejected_not_clamped() {
        for importance in [0, 11, -3] {
            let mut t = task("Importance");
            t["importance"] = json!(importance);
            let err = normalize_value(&json!([t])).unwrap_err();
            assert_eq!(err.field(), Some("importance"));
        }
    }

    #[test]
    fn test_fractional_importance_rejected() {
        let mut t = task("Importance");
        t["importance"] = json!(7.5);
        let err = normalize_value(&json!([t])).unwrap_err();
        assert_eq!(err.field(), Some("importance"));

        let mut t = task("Importance");
        t["importance"] = json!(7.0);
        assert_eq!(normalize_value(&json!([t])).unwrap()[0].importance, 7);
    }

    #[test]
    fn test_unknown_dependencies_are_dropped() {
        let mut a = task("A");
        a["dependencies"] = json!([1, 1, 5, -2]);
        let tasks = normalize_value(&json!([a, task("B")])).unwrap();
        assert_eq!(tasks[0].dependencies, vec![1]);
        assert_eq!(tasks[0].dropped_dependencies, vec![-2, 5]);
    }

    #[test]
    fn test_ids_beyond_i64_are_dropped_not_rejected() {
        let a: Value = serde_json::from_str(
            r#"{"title": "A", "due_date": "2026-03-10", "estimated_hours": 1, "importance": 5,
                "dependencies": [18446744073709551615, 9223372036854775808, 0]}"#,
        )
        .unwrap();
        let tasks = normalize_value(&json!([a])).unwrap();
        assert_eq!(tasks[0].dependencies, vec![0]);
        assert_eq!(
            tasks[0].dropped_dependencies,
            vec![9_223_372_036_854_775_808, 18_446_744_073_709_551_615]
        );
    }

    #[test]
    fn test_due_date_must_be_exact() {
        for raw in [" 2026-03-10", "2026-03-10 ", "2026-3-10", "20260310"] {
            let mut t = task("Loose date");
            t["due_date"] = json!(raw);
            let err = normalize_value(&json!([t])).unwrap_err();
            assert_eq!(err.field(), Some("due_date"), "accepted {raw:?}");
        }
    }

    #[test]
    fn test_non_integer_dependency_rejected() {
        let mut a = task("A");
        a["dependencies"] = json!(["first"]);
        let err = normalize_value(&json!([a])).unwrap_err();
        assert_eq!(err.field(), Some("dependencies"));
    }

    #[test]
    fn test_typed_inputs_share_rules() {
        let due = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let ok = TaskInput::new("Typed", due, 1.0, 3).with_dependencies([0]);
        let tasks = normalize_inputs(&[ok.clone()]).unwrap();
        assert_eq!(tasks[0].dependencies, vec![0]);

        let bad = TaskInput { importance: 12, ..ok };
        assert!(normalize_inputs(&[bad]).is_err());
    }
}
