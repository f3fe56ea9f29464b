//! # taskrank Core Library
//!
//! Explainable task prioritization. A caller submits a batch of tasks and gets
//! each one back with a numeric priority, per-factor scores, a short
//! explanation, and any warnings, either as a full ranking or as a top-N
//! suggestion list.
//!
//! ## Architecture
//!
//! - **Normalizer**: validates a raw batch and assigns positional ids
//! - **Scoring**: urgency, importance, effort and dependency curves
//! - **Graph**: dependency graph with cycle detection and blocking counts
//! - **Strategy**: named weight profiles
//! - **Engine**: weighted aggregation, explanations and warnings
//! - **Suggest**: top-N ranking with reasons
//!
//! The engine keeps no state between calls. Identical input and the same
//! `today` always give identical output, so calls may run concurrently
//! without coordination.
//!
//! ## Key Components
//!
//! - [`analyze`] / [`suggest`]: the two operations
//! - [`PriorityEngine`]: per-call scorer
//! - [`EngineConfig`]: defaults, curve constants and weight overrides

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod normalize;
pub mod scoring;
pub mod strategy;
pub mod suggest;
pub mod task;

pub use api::{
    analyze, analyze_tasks, suggest, suggest_tasks, AnalyzeRequest, AnalyzeResponse,
    SuggestRequest, SuggestResponse,
};
pub use config::EngineConfig;
pub use engine::{sort_by_priority, PriorityEngine};
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use graph::{DependencyGraph, GraphAnalysis};
pub use normalize::{normalize_inputs, normalize_value};
pub use scoring::CurveParams;
pub use strategy::{StrategyName, StrategyProfile, StrategyWeights};
pub use suggest::top_suggestions;
pub use task::{
    Factor, NormalizedTask, ScoreComponents, ScoredTask, SuggestedTask, TaskId, TaskInput,
};
