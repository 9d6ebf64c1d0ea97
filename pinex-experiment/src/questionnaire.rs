//! The six-dimension workload instrument administered after each condition.
//!
//! The core stores whatever integers it is given; clamping to 0..=100 in
//! steps of 5 belongs to the input surface. There is no failure mode here.

use pinex_core::{ParticipantId, SessionCondition, WorkloadRatings, WorkloadRecord};

/// Prompt material for one rating scale, for any input surface to render.
#[derive(Debug, Clone, Copy)]
pub struct WorkloadDimension {
    pub title: &'static str,
    pub question: &'static str,
    pub low_anchor: &'static str,
    pub high_anchor: &'static str,
}

pub const WORKLOAD_DIMENSIONS: [WorkloadDimension; 6] = [
    WorkloadDimension {
        title: "Mental Demand",
        question: "How mentally demanding was the task?",
        low_anchor: "Very Low",
        high_anchor: "Very High",
    },
    WorkloadDimension {
        title: "Physical Demand",
        question: "How physically demanding was the task?",
        low_anchor: "Very Low",
        high_anchor: "Very High",
    },
    WorkloadDimension {
        title: "Temporal Demand",
        question: "How hurried or rushed was the pace of the task?",
        low_anchor: "Very Low",
        high_anchor: "Very High",
    },
    WorkloadDimension {
        title: "Performance",
        question: "How successful were you in accomplishing what you were asked to do?",
        low_anchor: "Perfect",
        high_anchor: "Failure",
    },
    WorkloadDimension {
        title: "Effort",
        question: "How hard did you have to work to accomplish your level of performance?",
        low_anchor: "Very Low",
        high_anchor: "Very High",
    },
    WorkloadDimension {
        title: "Frustration",
        question: "How insecure, discouraged, irritated, stressed, and annoyed were you?",
        low_anchor: "Very Low",
        high_anchor: "Very High",
    },
];

/// Freezes one questionnaire submission into its immutable record.
pub fn record(
    participant: ParticipantId,
    condition: SessionCondition,
    ratings: WorkloadRatings,
) -> WorkloadRecord {
    WorkloadRecord::new(participant, condition, ratings)
}
