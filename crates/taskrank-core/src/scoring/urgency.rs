//! Urgency from days until the due date.
//!
//! Three branches joined continuously:
//!
//! ```text
//! d <= 0       100 - A * e^(r * d)                  (approaches 100 when deeply overdue)
//! 0 < d <= D   (100 - A) - (d / D) * ((100 - A) - M)  (linear over the first week)
//! d > D        F + (M - F) * e^(-(d - D) / T)        (decays toward the floor F)
//! ```
//!
//! With the defaults (A=5, r=0.3, D=7, M=50, F=10, T=10) a task due today
//! scores 95, one due in a week scores 50, and far-future tasks settle near 10.

use super::CurveParams;

/// Urgency score for a task due `days` days from today (negative = overdue).
pub fn urgency_score(days: f64, params: &CurveParams) -> f64 {
    let start = params.due_today_score();
    let end = params.near_term_end_score;

    if days <= 0.0 {
        100.0 - params.overdue_amplitude * (params.overdue_rate * days).exp()
    } else if days <= params.near_term_days {
        start - (days / params.near_term_days) * (start - end)
    } else {
        let floor = params.long_term_floor;
        floor + (end - floor) * (-(days - params.near_term_days) / params.long_term_decay_days).exp()
    }
}
