use serde::{Deserialize, Serialize};

use crate::error::GuessError;

/// Expected code for the built-in practice video.
pub const PRACTICE_PIN: &str = "8158";

/// A 4-digit numeric code, both the expected answer embedded in a stimulus
/// and the form a participant's guess must take.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PinCode(String);

impl PinCode {
    /// Validates raw participant input. Leading/trailing whitespace is
    /// tolerated; anything that is not exactly four ASCII digits is rejected.
    pub fn parse(raw: &str) -> Result<Self, GuessError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GuessError::EmptyGuess);
        }
        if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GuessError::NotFourDigits(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constructor for codes already known to be valid (the built-in
    /// catalogue table). Not exposed outside the crate.
    pub(crate) fn known(digits: &str) -> Self {
        Self(digits.to_string())
    }
}

impl From<PinCode> for String {
    fn from(pin: PinCode) -> String {
        pin.0
    }
}

impl TryFrom<String> for PinCode {
    type Error = GuessError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl std::fmt::Display for PinCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a video asset, e.g. `A_4062`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRef(pub String);

impl std::fmt::Display for VideoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One video plus the code it encodes. The practice stimulus is a distinct
/// variant so the no-catalogue path is a type, not a string comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Stimulus {
    Practice,
    Catalogue { video: VideoRef, pin: PinCode },
}

impl Stimulus {
    /// The code a guess for this stimulus is scored against.
    pub fn expected_pin(&self) -> PinCode {
        match self {
            Stimulus::Practice => PinCode::known(PRACTICE_PIN),
            Stimulus::Catalogue { pin, .. } => pin.clone(),
        }
    }

    pub fn video_name(&self) -> &str {
        match self {
            Stimulus::Practice => "Example_8158",
            Stimulus::Catalogue { video, .. } => &video.0,
        }
    }
}

/// Where one guess-the-code trial currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialState {
    /// Stimulus video is playing.
    Presenting,
    /// Video finished, input enabled.
    AwaitingGuess,
    /// Scored (correct or attempts exhausted), waiting for the participant
    /// to confirm moving on.
    AwaitingAdvance,
    /// Terminal for this trial.
    Complete,
}

impl TrialState {
    pub fn accepts_guess(&self) -> bool {
        matches!(self, TrialState::AwaitingGuess)
    }
}
