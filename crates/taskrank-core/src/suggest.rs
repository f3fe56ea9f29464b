//! Top-N suggestion ranking.

use chrono::NaiveDate;

use crate::engine::{overdue_phrase, sort_by_priority};
use crate::task::{ScoredTask, SuggestedTask};

/// Take the best `count` tasks, assigning 1-based ranks and a reason line.
///
/// `count <= 0` yields an empty list; a count larger than the batch returns
/// the whole batch.
pub fn top_suggestions(
    mut tasks: Vec<ScoredTask>,
    count: i64,
    today: NaiveDate,
) -> Vec<SuggestedTask> {
    let take = usize::try_from(count).unwrap_or(0).min(tasks.len());
    sort_by_priority(&mut tasks);
    tasks.truncate(take);

    tasks
        .into_iter()
        .enumerate()
        .map(|(i, task)| {
            let rank = i + 1;
            let suggestion_reason = suggestion_reason(rank, &task, today);
            SuggestedTask {
                task,
                rank,
                suggestion_reason,
            }
        })
        .collect()
}

fn suggestion_reason(rank: usize, task: &ScoredTask, today: NaiveDate) -> String {
    let days = (task.due_date - today).num_days();
    if days < 0 && !task.explanation.contains("OVERDUE") {
        format!(
            "Rank #{rank}: {} • {}",
            overdue_phrase(days.unsigned_abs()),
            task.explanation
        )
    } else {
        format!("Rank #{rank}: {}", task.explanation)
    }
}
