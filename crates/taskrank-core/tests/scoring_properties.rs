//! Property tests for the scoring curves and the engine's ordering guarantees.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use taskrank_core::scoring::{dependency_score, effort_score, importance_score, urgency_score};
use taskrank_core::{analyze_tasks, CurveParams, EngineConfig, StrategyName, TaskInput};

fn strategy_name() -> impl Strategy<Value = StrategyName> {
    prop_oneof![
        Just(StrategyName::SmartBalance),
        Just(StrategyName::FastestWins),
        Just(StrategyName::DeadlineDriven),
        Just(StrategyName::HighImpact),
    ]
}

proptest! {
    #[test]
    fn urgency_is_monotonic(d1 in -400i64..400, gap in 1i64..400) {
        let params = CurveParams::default();
        let d2 = d1 + gap;
        prop_assert!(urgency_score(d1 as f64, &params) >= urgency_score(d2 as f64, &params));
    }

    #[test]
    fn urgency_stays_in_range(d in -10_000i64..10_000) {
        let score = urgency_score(d as f64, &CurveParams::default());
        prop_assert!(score > 0.0);
        prop_assert!(score <= 100.0);
    }

    #[test]
    fn overdue_beats_not_overdue(overdue in 1i64..1000, ahead in 0i64..1000) {
        let params = CurveParams::default();
        prop_assert!(urgency_score(-(overdue as f64), &params) > urgency_score(ahead as f64, &params));
    }

    #[test]
    fn effort_is_inverted_and_bounded(h1 in 0.01f64..500.0, extra in 0.01f64..500.0) {
        let params = CurveParams::default();
        let short = effort_score(h1, &params);
        let long = effort_score(h1 + extra, &params);
        prop_assert!(short > long);
        prop_assert!(long > 0.0);
        prop_assert!(short <= 100.0);
    }

    #[test]
    fn importance_is_increasing(i in 1u8..10) {
        let params = CurveParams::default();
        prop_assert!(importance_score(i + 1, &params) > importance_score(i, &params));
    }

    #[test]
    fn dependency_score_is_increasing(b in 0usize..60) {
        let params = CurveParams::default();
        prop_assert!(dependency_score(b + 1, &params) >= dependency_score(b, &params));
        prop_assert!(dependency_score(b, &params) < 100.0);
    }

    #[test]
    fn analyze_keeps_every_task_sorted(
        specs in prop::collection::vec((-30i64..90, 0.1f64..40.0, 1i64..=10, prop::collection::vec(0i64..12, 0..4)), 0..12),
        strategy in strategy_name(),
    ) {
        let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let tasks: Vec<TaskInput> = specs
            .iter()
            .enumerate()
            .map(|(i, (days, hours, importance, deps))| {
                TaskInput::new(format!("task {i}"), today + Duration::days(*days), *hours, *importance)
                    .with_dependencies(deps.iter().copied())
            })
            .collect();

        let response = analyze_tasks(&tasks, strategy, &EngineConfig::default(), today).unwrap();
        prop_assert_eq!(response.total_tasks, tasks.len());
        for pair in response.tasks.windows(2) {
            prop_assert!(pair[0].priority_score >= pair[1].priority_score);
        }
        for task in &response.tasks {
            prop_assert!(task.priority_score >= 0.0);
            let c = task.score_components;
            for v in [c.urgency, c.importance, c.effort, c.dependencies] {
                prop_assert!((0.0..=100.0).contains(&v));
            }
        }
    }
}

#[test]
fn importance_examples() {
    let params = CurveParams::default();
    assert!(importance_score(10, &params) > importance_score(7, &params));
    assert!(importance_score(7, &params) > importance_score(4, &params));
}

#[test]
fn effort_examples() {
    let params = CurveParams::default();
    let one = effort_score(1.0, &params);
    let eight = effort_score(8.0, &params);
    let forty = effort_score(40.0, &params);
    assert!(one > eight && eight > forty);
    assert!(forty > 0.0 && one <= 100.0);
}
