use pinex_core::{PinCode, Stimulus, TrialState};

/// The trial currently in front of the participant: one stimulus, up to
/// `max_attempts` guesses.
#[derive(Debug, Clone)]
pub struct ActiveTrial {
    pub stimulus: Stimulus,
    /// 1-based position within the condition's shuffled set.
    pub video_index: u32,
    /// 1-based guess counter. Reset only when a new trial starts, never on
    /// a wrong guess.
    pub attempt: u8,
    pub state: TrialState,
}

/// What scoring one accepted guess produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessFeedback {
    pub correct: bool,
    /// Which attempt this was.
    pub attempt: u8,
    /// True when the trial is over (correct, or attempts exhausted).
    pub completed: bool,
}

/// Where the session goes after a completed trial is advanced past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    /// More stimuli remain; the value is the next 1-based video index.
    NextVideo(u32),
    /// That was the condition's last video.
    EndOfCondition,
}

impl ActiveTrial {
    pub fn new(stimulus: Stimulus, video_index: u32) -> Self {
        Self {
            stimulus,
            video_index,
            attempt: 1,
            state: TrialState::Presenting,
        }
    }

    /// The stimulus finished playing; input becomes possible. Returns false
    /// if the trial was not presenting.
    pub fn video_ended(&mut self) -> bool {
        if self.state != TrialState::Presenting {
            return false;
        }
        self.state = TrialState::AwaitingGuess;
        true
    }

    /// Scores an already-validated guess. Advances to `AwaitingAdvance`
    /// iff the guess was correct or this was the final attempt; otherwise
    /// the attempt counter moves and the trial keeps awaiting a guess.
    pub fn score(&mut self, guess: &PinCode, max_attempts: u8) -> GuessFeedback {
        let attempt = self.attempt;
        let correct = *guess == self.stimulus.expected_pin();
        let completed = correct || attempt >= max_attempts;
        if completed {
            self.state = TrialState::AwaitingAdvance;
        } else {
            self.attempt += 1;
        }
        GuessFeedback {
            correct,
            attempt,
            completed,
        }
    }
}
