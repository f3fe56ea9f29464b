//! Priority engine.
//!
//! Combines the four factor scores under a strategy profile:
//!
//! ```text
//! base     = wu' * urgency + wi' * importance + we' * effort   (w' renormalized over the three)
//! bonus    = w_dependencies * dependency_score
//! priority = clamp(base, 0, 100) + bonus
//! ```
//!
//! The dependency bonus sits outside the clamp, so a heavy blocker can score
//! above 100.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::graph::{DependencyGraph, GraphAnalysis};
use crate::scoring::{
    dependency_score, effort_score, importance_score, urgency_score, CurveParams,
};
use crate::strategy::StrategyProfile;
use crate::task::{round2, Factor, NormalizedTask, ScoreComponents, ScoredTask};

/// Multiplier applied to the weighted dependency score before it is added.
const DEPENDENCY_BONUS_SCALE: f64 = 1.0;

/// A second factor is mentioned only if it contributes at least this share of the top one.
const SECOND_REASON_SHARE: f64 = 0.5;

/// Stateless scorer for one call: a profile, curve constants, and "today".
#[derive(Debug, Clone)]
pub struct PriorityEngine {
    profile: StrategyProfile,
    curves: CurveParams,
    today: NaiveDate,
}

impl PriorityEngine {
    pub fn new(profile: StrategyProfile, curves: CurveParams, today: NaiveDate) -> Self {
        Self {
            profile,
            curves,
            today,
        }
    }

    pub fn profile(&self) -> &StrategyProfile {
        &self.profile
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Score every task and return them ordered by descending priority.
    pub fn rank(&self, tasks: &[NormalizedTask]) -> Vec<ScoredTask> {
        let analysis = DependencyGraph::build(tasks).analyze();
        let mut scored: Vec<ScoredTask> = tasks
            .iter()
            .map(|task| self.score_task(task, &analysis))
            .collect();
        sort_by_priority(&mut scored);

        tracing::debug!(
            strategy = %self.profile.name,
            tasks = scored.len(),
            cycles = analysis.cycles.len(),
            "batch scored"
        );
        scored
    }

    /// Score a single task against an already analyzed graph.
    pub fn score_task(&self, task: &NormalizedTask, analysis: &GraphAnalysis) -> ScoredTask {
        let days = task.days_until_due(self.today);
        let blocked = analysis.blocked_count(task.id);

        let components = ScoreComponents {
            urgency: urgency_score(days as f64, &self.curves),
            importance: importance_score(task.importance, &self.curves),
            effort: effort_score(task.estimated_hours, &self.curves),
            dependencies: dependency_score(blocked, &self.curves),
        };

        let contributions = self.contributions(&components);
        let base = (contributions.urgency + contributions.importance + contributions.effort)
            .clamp(0.0, 100.0);
        let priority_score = base + contributions.dependencies;

        let explanation = explain(task, days, blocked, &contributions);
        let warning = collect_warnings(task, analysis);

        ScoredTask {
            id: task.id,
            title: task.title.clone(),
            due_date: task.due_date,
            estimated_hours: task.estimated_hours,
            importance: task.importance,
            dependencies: task.dependencies.clone(),
            priority_score: round2(priority_score),
            score_components: components.rounded(),
            explanation,
            warning,
        }
    }

    /// Weighted share of each factor in the final score.
    fn contributions(&self, components: &ScoreComponents) -> ScoreComponents {
        let weights = &self.profile.weights;
        let (wu, wi, we) = weights.base_weights();
        ScoreComponents {
            urgency: wu * components.urgency,
            importance: wi * components.importance,
            effort: we * components.effort,
            dependencies: weights.dependencies * components.dependencies * DEPENDENCY_BONUS_SCALE,
        }
    }
}

/// Highest priority first; ties go to the earlier due date, then the lower id.
pub fn sort_by_priority(tasks: &mut [ScoredTask]) {
    tasks.sort_by(|a, b| {
        b.priority_score
            .total_cmp(&a.priority_score)
            .then_with(|| a.due_date.cmp(&b.due_date))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Build the explanation from the one or two largest contributors.
fn explain(
    task: &NormalizedTask,
    days: i64,
    blocked: usize,
    contributions: &ScoreComponents,
) -> String {
    let mut ranked = Factor::PRECEDENCE;
    // stable: equal contributions keep precedence order
    ranked.sort_by(|a, b| {
        contributions
            .get(*b)
            .partial_cmp(&contributions.get(*a))
            .unwrap_or(Ordering::Equal)
    });

    let top = contributions.get(ranked[0]);
    let mut reasons = vec![describe(ranked[0], task, days, blocked)];
    let second = contributions.get(ranked[1]);
    if second > 0.0 && second >= top * SECOND_REASON_SHARE {
        reasons.push(describe(ranked[1], task, days, blocked));
    }
    reasons.join(" • ")
}

fn describe(factor: Factor, task: &NormalizedTask, days: i64, blocked: usize) -> String {
    match factor {
        Factor::Urgency => urgency_phrase(days),
        Factor::Importance => match task.importance {
            8..=10 => "High importance rating".to_string(),
            5..=7 => format!("Moderate importance ({}/10)", task.importance),
            _ => format!("Low importance ({}/10)", task.importance),
        },
        Factor::Effort => {
            let hours = task.estimated_hours;
            if hours <= 2.0 {
                format!("Quick win ({hours}h)")
            } else if hours <= 8.0 {
                format!("Moderate effort ({hours}h)")
            } else {
                format!("High effort task ({hours}h)")
            }
        }
        Factor::Dependencies => format!("Blocks {}", plural(blocked, "other task")),
    }
}

/// Phrase describing how close the due date is.
pub(crate) fn urgency_phrase(days: i64) -> String {
    match days {
        d if d < 0 => overdue_phrase(d.unsigned_abs()),
        0 => "Due TODAY".to_string(),
        d if d <= 7 => format!("Due very soon ({})", plural(d as usize, "day")),
        d => format!("Due in {}", plural(d as usize, "day")),
    }
}

pub(crate) fn overdue_phrase(days_overdue: u64) -> String {
    format!("OVERDUE by {}", plural(days_overdue as usize, "day"))
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn collect_warnings(task: &NormalizedTask, analysis: &GraphAnalysis) -> Option<String> {
    let mut warnings = Vec::new();

    if !task.dropped_dependencies.is_empty() {
        warnings.push(format!(
            "unknown dependency ids dropped: {}",
            join_ids(task.dropped_dependencies.iter())
        ));
    }

    let peers = analysis.cycle_peers(task.id);
    if !peers.is_empty() {
        warnings.push(format!(
            "circular dependency detected (tasks {})",
            join_ids(peers.iter())
        ));
    }

    if warnings.is_empty() {
        None
    } else {
        Some(warnings.join("; "))
    }
}

fn join_ids<T: ToString>(ids: impl Iterator<Item = T>) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}
