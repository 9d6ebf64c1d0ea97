//! Folds raw trial and questionnaire records into one summary row per
//! (participant, condition) pair.

use pinex_core::{ParticipantId, SessionCondition, TrialRecord, WorkloadRatings, WorkloadRecord};

/// One exported row. `total_attempts` counts guesses, not videos: a video
/// that needed two guesses contributes two.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub participant: ParticipantId,
    pub condition: SessionCondition,
    pub correct_attempts: usize,
    pub total_attempts: usize,
    /// correct / total, rounded to 2 decimal places.
    pub success_rate: f64,
    /// Absent when the condition's questionnaire was never submitted.
    pub workload: Option<WorkloadRatings>,
}

/// Groups trials by (participant, condition) in first-seen order, computes
/// the per-group attempt counts and success rate, and joins the workload
/// record with the same key when one exists.
pub fn aggregate(trials: &[TrialRecord], workloads: &[WorkloadRecord]) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = Vec::new();

    for trial in trials {
        let index = rows
            .iter()
            .position(|r| r.participant == trial.participant && r.condition == trial.condition);
        let index = match index {
            Some(index) => index,
            None => {
                rows.push(SummaryRow {
                    participant: trial.participant,
                    condition: trial.condition,
                    correct_attempts: 0,
                    total_attempts: 0,
                    success_rate: 0.0,
                    workload: None,
                });
                rows.len() - 1
            }
        };
        rows[index].total_attempts += 1;
        if trial.correct {
            rows[index].correct_attempts += 1;
        }
    }

    for row in &mut rows {
        row.success_rate = round2(row.correct_attempts as f64 / row.total_attempts as f64);
        row.workload = workloads
            .iter()
            .find(|w| w.participant == row.participant && w.condition == row.condition)
            .map(|w| w.ratings.clone());
    }

    rows
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
