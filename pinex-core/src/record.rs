use serde::{Deserialize, Serialize};

use crate::condition::SessionCondition;
use crate::participant::ParticipantId;
use crate::stimulus::PinCode;

/// One scored guess. Created per accepted guess (not per video), immutable,
/// appended to the session log and mirrored to the durable store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialRecord {
    pub participant: ParticipantId,
    pub condition: SessionCondition,
    /// 1-based position within the shuffled stimulus set; 1 for practice.
    pub video_index: u32,
    /// Expected code.
    pub pin_code: PinCode,
    /// Submitted code.
    pub guess: PinCode,
    pub correct: bool,
}

/// Six-dimension workload ratings, each in 0..=100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadRatings {
    pub mental_demand: u8,
    pub physical_demand: u8,
    pub temporal_demand: u8,
    pub performance: u8,
    pub effort: u8,
    pub frustration: u8,
}

impl Default for WorkloadRatings {
    fn default() -> Self {
        Self {
            mental_demand: 50,
            physical_demand: 50,
            temporal_demand: 50,
            performance: 50,
            effort: 50,
            frustration: 50,
        }
    }
}

/// One questionnaire submission, recorded after a condition's last trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadRecord {
    #[serde(rename = "participantId")]
    pub participant: ParticipantId,
    pub condition: SessionCondition,
    #[serde(flatten)]
    pub ratings: WorkloadRatings,
}

impl WorkloadRecord {
    pub fn new(
        participant: ParticipantId,
        condition: SessionCondition,
        ratings: WorkloadRatings,
    ) -> Self {
        Self {
            participant,
            condition,
            ratings,
        }
    }
}
