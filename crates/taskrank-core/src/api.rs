//! Analyze and Suggest operations.
//!
//! These are the two entry points an external request layer calls. Each call
//! is a pure function of its request, the configuration, and `today`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::EngineConfig;
use crate::engine::PriorityEngine;
use crate::error::{Result, ValidationError};
use crate::normalize::{normalize_inputs, normalize_value};
use crate::strategy::StrategyName;
use crate::suggest::top_suggestions;
use crate::task::{NormalizedTask, ScoredTask, SuggestedTask, TaskInput};

/// `{tasks, strategy?}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Raw batch; validated by the normalizer so errors name index and field.
    #[serde(default)]
    pub tasks: Value,
    #[serde(default)]
    pub strategy: Option<String>,
}

/// `{tasks, strategy?, count?}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub tasks: Value,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub tasks: Vec<ScoredTask>,
    pub strategy: StrategyName,
    pub total_tasks: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<SuggestedTask>,
    pub strategy: StrategyName,
    pub requested_count: i64,
    pub returned_count: usize,
}

impl AnalyzeRequest {
    /// Accept either a request object or a bare task array.
    pub fn from_value(body: Value) -> Result<Self> {
        match body {
            Value::Array(_) => Ok(Self {
                tasks: body,
                strategy: None,
            }),
            Value::Object(_) => Ok(serde_json::from_value(body)?),
            _ => Err(ValidationError::NotAList.into()),
        }
    }
}

impl SuggestRequest {
    /// Accept either a request object or a bare task array.
    pub fn from_value(body: Value) -> Result<Self> {
        match body {
            Value::Array(_) => Ok(Self {
                tasks: body,
                ..Self::default()
            }),
            Value::Object(_) => Ok(serde_json::from_value(body)?),
            _ => Err(ValidationError::NotAList.into()),
        }
    }
}

/// Score a batch and return every task, highest priority first.
///
/// # Errors
///
/// Fails on an unknown strategy name or any validation error; no partial
/// results are returned.
pub fn analyze(
    request: &AnalyzeRequest,
    config: &EngineConfig,
    today: NaiveDate,
) -> Result<AnalyzeResponse> {
    let strategy = resolve_strategy(request.strategy.as_deref(), config)?;
    let tasks = normalize_value(&request.tasks)?;
    Ok(run_analyze(&tasks, strategy, config, today))
}

/// [`analyze`] for callers holding typed inputs.
pub fn analyze_tasks(
    tasks: &[TaskInput],
    strategy: StrategyName,
    config: &EngineConfig,
    today: NaiveDate,
) -> Result<AnalyzeResponse> {
    let tasks = normalize_inputs(tasks)?;
    Ok(run_analyze(&tasks, strategy, config, today))
}

/// Score a batch and return the top `count` suggestions.
///
/// `count` defaults to the configured default; non-positive counts give an
/// empty list.
pub fn suggest(
    request: &SuggestRequest,
    config: &EngineConfig,
    today: NaiveDate,
) -> Result<SuggestResponse> {
    let strategy = resolve_strategy(request.strategy.as_deref(), config)?;
    let count = request.count.unwrap_or(config.default_count);
    let tasks = normalize_value(&request.tasks)?;
    Ok(run_suggest(&tasks, strategy, count, config, today))
}

/// [`suggest`] for callers holding typed inputs.
pub fn suggest_tasks(
    tasks: &[TaskInput],
    strategy: StrategyName,
    count: i64,
    config: &EngineConfig,
    today: NaiveDate,
) -> Result<SuggestResponse> {
    let tasks = normalize_inputs(tasks)?;
    Ok(run_suggest(&tasks, strategy, count, config, today))
}

fn resolve_strategy(name: Option<&str>, config: &EngineConfig) -> Result<StrategyName> {
    match name {
        Some(name) => name.parse(),
        None => Ok(config.default_strategy),
    }
}

fn run_analyze(
    tasks: &[NormalizedTask],
    strategy: StrategyName,
    config: &EngineConfig,
    today: NaiveDate,
) -> AnalyzeResponse {
    tracing::debug!(tasks = tasks.len(), %strategy, %today, "analyze");
    let engine = PriorityEngine::new(config.profile(strategy), config.curves.clone(), today);
    let scored = engine.rank(tasks);
    AnalyzeResponse {
        total_tasks: scored.len(),
        tasks: scored,
        strategy,
    }
}

fn run_suggest(
    tasks: &[NormalizedTask],
    strategy: StrategyName,
    count: i64,
    config: &EngineConfig,
    today: NaiveDate,
) -> SuggestResponse {
    tracing::debug!(tasks = tasks.len(), %strategy, count, %today, "suggest");
    let engine = PriorityEngine::new(config.profile(strategy), config.curves.clone(), today);
    let suggestions = top_suggestions(engine.rank(tasks), count, engine.today());
    SuggestResponse {
        returned_count: suggestions.len(),
        suggestions,
        strategy,
        requested_count: count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn test_empty_batch_analyzes_to_empty() {
        let request = AnalyzeRequest {
            tasks: json!([]),
            strategy: None,
        };
        let response = analyze(&request, &EngineConfig::default(), today()).unwrap();
        assert!(response.tasks.is_empty());
        assert_eq!(response.total_tasks, 0);
        assert_eq!(response.strategy, StrategyName::SmartBalance);
    }

    #[test]
    fn test_missing_tasks_is_not_a_list() {
        let request = AnalyzeRequest::from_value(json!({"strategy": "high_impact"})).unwrap();
        let err = analyze(&request, &EngineConfig::default(), today()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::NotAList)));
    }

    #[test]
    fn test_unknown_strategy_fails() {
        let request = AnalyzeRequest {
            tasks: json!([]),
            strategy: Some("yolo".into()),
        };
        let err = analyze(&request, &EngineConfig::default(), today()).unwrap_err();
        assert!(matches!(err, CoreError::UnknownStrategy(_)));
    }

    #[test]
    fn test_bare_array_body() {
        let request = SuggestRequest::from_value(json!([])).unwrap();
        assert_eq!(request.count, None);
        assert!(SuggestRequest::from_value(json!("tasks")).is_err());
    }

    #[test]
    fn test_suggest_defaults_count_from_config() {
        let tasks: Vec<Value> = (0..5)
            .map(|i| {
                json!({
                    "title": format!("task {i}"),
                    "due_date": "2026-03-05",
                    "estimated_hours": 1 + i,
                    "importance": 5,
                })
            })
            .collect();
        let request = SuggestRequest {
            tasks: Value::Array(tasks),
            ..SuggestRequest::default()
        };
        let response = suggest(&request, &EngineConfig::default(), today()).unwrap();
        assert_eq!(response.requested_count, 3);
        assert_eq!(response.returned_count, 3);
        assert_eq!(response.suggestions[0].rank, 1);
        assert_eq!(response.suggestions[0].task.id, 0);
    }
}
