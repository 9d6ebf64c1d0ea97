use serde::{Deserialize, Serialize};

use crate::error::SequenceError;

/// One experimental interface variant under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    NormalKeypad,
    RandomKeypadShuffledOnce,
    RandomKeypad,
    DrawingTouchscreen,
}

/// Single-letter stimulus-set tag a condition draws its videos from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StimulusTag {
    A,
    B,
    C,
    D,
}

impl StimulusTag {
    pub fn letter(&self) -> char {
        match self {
            StimulusTag::A => 'A',
            StimulusTag::B => 'B',
            StimulusTag::C => 'C',
            StimulusTag::D => 'D',
        }
    }
}

/// The fixed order the four conditions are presented in for one participant.
pub type ConditionOrder = [Condition; 4];

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::NormalKeypad,
        Condition::RandomKeypadShuffledOnce,
        Condition::RandomKeypad,
        Condition::DrawingTouchscreen,
    ];

    pub fn tag(&self) -> StimulusTag {
        match self {
            Condition::NormalKeypad => StimulusTag::A,
            Condition::RandomKeypadShuffledOnce => StimulusTag::B,
            Condition::RandomKeypad => StimulusTag::C,
            Condition::DrawingTouchscreen => StimulusTag::D,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            Condition::NormalKeypad => "normal-keypad",
            Condition::RandomKeypadShuffledOnce => "random-keypad-shuffled-once",
            Condition::RandomKeypad => "random-keypad",
            Condition::DrawingTouchscreen => "drawing-touchscreen",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        Condition::ALL.into_iter().find(|c| c.wire_name() == name)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A condition as the session sees it: the onboarding practice run, or one
/// of the four measured conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SessionCondition {
    Practice,
    Measured(Condition),
}

impl SessionCondition {
    pub const PRACTICE_WIRE_NAME: &'static str = "test";

    pub fn wire_name(&self) -> &'static str {
        match self {
            SessionCondition::Practice => Self::PRACTICE_WIRE_NAME,
            SessionCondition::Measured(c) => c.wire_name(),
        }
    }

    pub fn is_practice(&self) -> bool {
        matches!(self, SessionCondition::Practice)
    }
}

impl From<SessionCondition> for String {
    fn from(c: SessionCondition) -> String {
        c.wire_name().to_string()
    }
}

impl TryFrom<String> for SessionCondition {
    type Error = SequenceError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        if name == Self::PRACTICE_WIRE_NAME {
            return Ok(SessionCondition::Practice);
        }
        Condition::from_wire(&name)
            .map(SessionCondition::Measured)
            .ok_or(SequenceError::InvalidCondition(name))
    }
}

impl std::fmt::Display for SessionCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}
