use serde::{Deserialize, Serialize};

use crate::error::SequenceError;

/// Identifies one study participant. Participant numbers are 1-based and
/// externally assigned; zero is not a valid participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub struct ParticipantId(u32);

impl ParticipantId {
    pub fn new(id: u32) -> Result<Self, SequenceError> {
        if id == 0 {
            return Err(SequenceError::InvalidParticipant(id));
        }
        Ok(Self(id))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<ParticipantId> for u32 {
    fn from(id: ParticipantId) -> u32 {
        id.0
    }
}

impl TryFrom<u32> for ParticipantId {
    type Error = SequenceError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero() {
        assert_eq!(
            ParticipantId::new(0),
            Err(SequenceError::InvalidParticipant(0))
        );
    }

    #[test]
    fn accepts_positive() {
        assert_eq!(ParticipantId::new(5).map(|p| p.get()), Ok(5));
    }
}
