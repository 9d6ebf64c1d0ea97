//! Session orchestration: one value per participant, driven call by call.
//!
//! The session owns the condition order, the current trial, both record
//! logs, and the durable store handle. Every transition is a synchronous
//! reaction to one driver call; the phase field is what guarantees a single
//! active trial per participant.

use tracing::{debug, info};

use pinex_core::{
    CatalogueError, ConditionOrder, GuessError, ParticipantId, PinCode, SequenceError,
    SessionCondition, SessionPhase, Stimulus, StimulusCatalogue, TrialRecord, TrialState,
    WorkloadRatings, WorkloadRecord,
};
use pinex_store::{RecordStore, StoreError};

use crate::config::StudyConfig;
use crate::questionnaire;
use crate::sequencer::{condition_order_for, deterministic_shuffle};
use crate::trial::{ActiveTrial, GuessFeedback, NextAction};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    Guess(#[from] GuessError),

    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{op} is not valid in the {phase:?} phase")]
    WrongPhase {
        op: &'static str,
        phase: SessionPhase,
    },

    #[error("trial is not ready for {op} (state {state:?})")]
    TrialNotReady {
        op: &'static str,
        state: TrialState,
    },
}

impl SessionError {
    /// Recoverable errors re-prompt without touching session state;
    /// everything else blocks the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SessionError::Guess(_))
    }
}

/// What acknowledging a transition screen led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    NextCondition(SessionCondition),
    SessionComplete,
}

pub struct Session<C, S>
where
    C: StimulusCatalogue,
    S: RecordStore,
{
    participant: ParticipantId,
    order: ConditionOrder,
    config: StudyConfig,
    catalogue: C,
    store: S,
    position: SessionCondition,
    stimulus_set: Vec<Stimulus>,
    trial: Option<ActiveTrial>,
    phase: SessionPhase,
    trials: Vec<TrialRecord>,
    workloads: Vec<WorkloadRecord>,
}

impl<C, S> Session<C, S>
where
    C: StimulusCatalogue,
    S: RecordStore,
{
    /// Opens a session for `participant`: computes the condition order,
    /// replays any persisted trial log, and positions the session at the
    /// first unscored video. A fresh participant starts at the practice
    /// condition regardless of the computed order.
    pub fn start(
        participant: ParticipantId,
        config: StudyConfig,
        catalogue: C,
        store: S,
    ) -> Result<Self, SessionError> {
        let order = condition_order_for(participant);
        let recovered = store.get(participant)?.unwrap_or_default();
        let mut session = Self {
            participant,
            order,
            config,
            catalogue,
            store,
            position: SessionCondition::Practice,
            stimulus_set: Vec::new(),
            trial: None,
            phase: SessionPhase::Finished,
            trials: recovered,
            workloads: Vec::new(),
        };
        session.resume()?;
        info!(
            participant = participant.get(),
            recovered = session.trials.len(),
            phase = ?session.phase,
            "session started"
        );
        Ok(session)
    }

    /// Walks practice, then the condition order, and opens the first video
    /// that is neither correctly guessed nor out of attempts — always at
    /// attempt 1, since in-progress attempt counters are not persisted. A
    /// log with every video scored leaves the session finished.
    fn resume(&mut self) -> Result<(), SessionError> {
        let conditions = std::iter::once(SessionCondition::Practice)
            .chain(self.order.iter().copied().map(SessionCondition::Measured));
        for condition in conditions {
            let set = self.stimulus_set_for(condition)?;
            for index in 1..=set.len() as u32 {
                if !self.video_complete(condition, index) {
                    let stimulus = set[(index - 1) as usize].clone();
                    self.position = condition;
                    self.stimulus_set = set;
                    self.trial = Some(ActiveTrial::new(stimulus, index));
                    self.phase = SessionPhase::Trial;
                    return Ok(());
                }
            }
        }
        self.phase = SessionPhase::Finished;
        Ok(())
    }

    /// The practice set is built in; a measured condition's set is fetched
    /// from the catalogue and put into this participant's deterministic
    /// order. No guess can be submitted before this has succeeded.
    fn stimulus_set_for(&self, condition: SessionCondition) -> Result<Vec<Stimulus>, SessionError> {
        match condition {
            SessionCondition::Practice => Ok(vec![Stimulus::Practice]),
            SessionCondition::Measured(measured) => {
                let mut set = self.catalogue.stimuli_for(measured)?;
                if set.is_empty() {
                    return Err(CatalogueError::EmptySet {
                        condition: measured,
                    }
                    .into());
                }
                deterministic_shuffle(&mut set, self.participant.get());
                Ok(set)
            }
        }
    }

    /// A video counts as complete once a correct guess is on record or the
    /// attempt budget is spent.
    fn video_complete(&self, condition: SessionCondition, video_index: u32) -> bool {
        let mut attempts = 0;
        for record in &self.trials {
            if record.condition == condition && record.video_index == video_index {
                if record.correct {
                    return true;
                }
                attempts += 1;
            }
        }
        attempts >= self.config.max_attempts
    }

    /// The current stimulus finished playing; guessing becomes possible.
    /// Tolerates repeat notifications.
    pub fn video_ended(&mut self) -> Result<(), SessionError> {
        let phase = self.phase;
        match self.trial.as_mut() {
            Some(trial) if phase.is_trial() => {
                trial.video_ended();
                Ok(())
            }
            _ => Err(SessionError::WrongPhase {
                op: "video-ended",
                phase,
            }),
        }
    }

    /// Validates and scores one guess. A malformed guess returns the
    /// validation error and changes nothing; an accepted guess appends a
    /// record (correct or not) and persists the whole log before returning.
    pub fn submit_guess(&mut self, raw: &str) -> Result<GuessFeedback, SessionError> {
        let phase = self.phase;
        let max_attempts = self.config.max_attempts;
        let Some(trial) = self.trial.as_mut().filter(|_| phase.is_trial()) else {
            return Err(SessionError::WrongPhase {
                op: "submit-guess",
                phase,
            });
        };
        if !trial.state.accepts_guess() {
            return Err(SessionError::TrialNotReady {
                op: "submit-guess",
                state: trial.state,
            });
        }

        let guess = PinCode::parse(raw)?;
        let feedback = trial.score(&guess, max_attempts);
        let video_index = trial.video_index;
        let pin_code = trial.stimulus.expected_pin();

        self.trials.push(TrialRecord {
            participant: self.participant,
            condition: self.position,
            video_index,
            pin_code,
            guess,
            correct: feedback.correct,
        });
        self.store.put(self.participant, &self.trials)?;
        debug!(
            participant = self.participant.get(),
            condition = %self.position,
            video_index,
            attempt = feedback.attempt,
            correct = feedback.correct,
            "guess scored"
        );
        Ok(feedback)
    }

    /// Moves past a completed trial: the next stimulus of the set, or the
    /// questionnaire once the set is exhausted. Practice has a single video,
    /// so it always ends its condition here.
    pub fn advance(&mut self) -> Result<NextAction, SessionError> {
        let phase = self.phase;
        let Some(trial) = self.trial.as_mut().filter(|_| phase.is_trial()) else {
            return Err(SessionError::WrongPhase {
                op: "advance",
                phase,
            });
        };
        if trial.state != TrialState::AwaitingAdvance {
            return Err(SessionError::TrialNotReady {
                op: "advance",
                state: trial.state,
            });
        }
        trial.state = TrialState::Complete;
        let finished = trial.video_index;

        if (finished as usize) < self.stimulus_set.len() {
            let next_index = finished + 1;
            let stimulus = self.stimulus_set[(next_index - 1) as usize].clone();
            self.trial = Some(ActiveTrial::new(stimulus, next_index));
            Ok(NextAction::NextVideo(next_index))
        } else {
            self.trial = None;
            self.phase = SessionPhase::Questionnaire;
            debug!(condition = %self.position, "condition finished, questionnaire open");
            Ok(NextAction::EndOfCondition)
        }
    }

    /// Records the post-condition workload ratings and raises the
    /// transition screen. Never fails on the ratings themselves.
    pub fn submit_questionnaire(&mut self, ratings: WorkloadRatings) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Questionnaire {
            return Err(SessionError::WrongPhase {
                op: "submit-questionnaire",
                phase: self.phase,
            });
        }
        self.workloads
            .push(questionnaire::record(self.participant, self.position, ratings));
        self.phase = SessionPhase::Transition;
        Ok(())
    }

    /// The condition following `after` in this session: practice maps to
    /// index 0 of the order, the last measured condition to the end of the
    /// session. A condition absent from the order is a sequencing
    /// inconsistency (unreachable under correct driving).
    pub fn next_condition(
        &self,
        after: SessionCondition,
    ) -> Result<Option<SessionCondition>, SequenceError> {
        match after {
            SessionCondition::Practice => Ok(Some(SessionCondition::Measured(self.order[0]))),
            SessionCondition::Measured(measured) => {
                let index = self
                    .order
                    .iter()
                    .position(|&c| c == measured)
                    .ok_or_else(|| {
                        SequenceError::InvalidCondition(measured.wire_name().to_string())
                    })?;
                Ok(self
                    .order
                    .get(index + 1)
                    .copied()
                    .map(SessionCondition::Measured))
            }
        }
    }

    /// Explicit pacing gate between conditions: enters the next condition's
    /// first trial, or finishes the session after the last questionnaire.
    pub fn acknowledge_transition(&mut self) -> Result<TransitionOutcome, SessionError> {
        if self.phase != SessionPhase::Transition {
            return Err(SessionError::WrongPhase {
                op: "acknowledge-transition",
                phase: self.phase,
            });
        }
        match self.next_condition(self.position)? {
            Some(next) => {
                let set = self.stimulus_set_for(next)?;
                let stimulus = set[0].clone();
                self.position = next;
                self.stimulus_set = set;
                self.trial = Some(ActiveTrial::new(stimulus, 1));
                self.phase = SessionPhase::Trial;
                info!(
                    participant = self.participant.get(),
                    condition = %next,
                    "condition started"
                );
                Ok(TransitionOutcome::NextCondition(next))
            }
            None => {
                self.phase = SessionPhase::Finished;
                info!(
                    participant = self.participant.get(),
                    trials = self.trials.len(),
                    questionnaires = self.workloads.len(),
                    "session complete"
                );
                Ok(TransitionOutcome::SessionComplete)
            }
        }
    }

    pub fn participant(&self) -> ParticipantId {
        self.participant
    }

    pub fn config(&self) -> &StudyConfig {
        &self.config
    }

    pub fn condition_order(&self) -> &ConditionOrder {
        &self.order
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_condition(&self) -> SessionCondition {
        self.position
    }

    pub fn current_trial(&self) -> Option<&ActiveTrial> {
        self.trial.as_ref()
    }

    /// (current video, videos in this condition's set), while a trial is
    /// active.
    pub fn trial_progress(&self) -> Option<(u32, usize)> {
        self.trial
            .as_ref()
            .map(|t| (t.video_index, self.stimulus_set.len()))
    }

    pub fn trials(&self) -> &[TrialRecord] {
        &self.trials
    }

    pub fn workloads(&self) -> &[WorkloadRecord] {
        &self.workloads
    }

    /// Tears the session down, handing both logs to the exporter.
    pub fn into_logs(self) -> (Vec<TrialRecord>, Vec<WorkloadRecord>) {
        (self.trials, self.workloads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinex_core::{BuiltinCatalogue, Condition, PRACTICE_PIN};
    use pinex_store::MemoryStore;

    fn id(n: u32) -> ParticipantId {
        ParticipantId::new(n).expect("valid id")
    }

    fn fresh(n: u32) -> Session<BuiltinCatalogue, MemoryStore> {
        Session::start(
            id(n),
            StudyConfig::default(),
            BuiltinCatalogue,
            MemoryStore::new(),
        )
        .expect("session")
    }

    fn pass_current_trial(session: &mut Session<BuiltinCatalogue, MemoryStore>) {
        session.video_ended().expect("video end");
        let pin = session
            .current_trial()
            .expect("active trial")
            .stimulus
            .expected_pin();
        let feedback = session.submit_guess(pin.as_str()).expect("guess");
        assert!(feedback.correct);
    }

    #[test]
    fn session_starts_at_practice() {
        let session = fresh(1);
        assert_eq!(session.phase(), SessionPhase::Trial);
        assert_eq!(session.current_condition(), SessionCondition::Practice);
        assert_eq!(session.trial_progress(), Some((1, 1)));
    }

    #[test]
    fn practice_scores_the_fixed_pin_and_ends_its_condition() {
        let mut session = fresh(5);
        session.video_ended().expect("video end");
        let feedback = session.submit_guess(PRACTICE_PIN).expect("guess");
        assert!(feedback.correct);
        assert!(feedback.completed);
        assert_eq!(session.advance().expect("advance"), NextAction::EndOfCondition);
        assert_eq!(session.phase(), SessionPhase::Questionnaire);
    }

    #[test]
    fn practice_maps_to_first_condition_of_the_order() {
        let session = fresh(5);
        // (5 - 1) % 4 == 0, so participant 5 shares row 0 with participant 1.
        assert_eq!(session.condition_order(), &crate::sequencer::LATIN_SQUARE[0]);
        assert_eq!(
            session.next_condition(SessionCondition::Practice).expect("next"),
            Some(SessionCondition::Measured(Condition::NormalKeypad))
        );
    }

    #[test]
    fn malformed_guess_leaves_no_trace() {
        let mut session = fresh(1);
        session.video_ended().expect("video end");
        for raw in ["12a3", "123", ""] {
            let err = session.submit_guess(raw).expect_err("must reject");
            assert!(err.is_recoverable(), "{raw:?}");
        }
        assert!(session.trials().is_empty());
        assert_eq!(session.current_trial().expect("trial").attempt, 1);
    }

    #[test]
    fn guess_before_video_end_is_refused() {
        let mut session = fresh(1);
        let err = session.submit_guess("1234").expect_err("must refuse");
        assert!(matches!(err, SessionError::TrialNotReady { .. }));
    }

    #[test]
    fn three_wrong_guesses_complete_the_video_and_reset_the_counter() {
        let mut session = fresh(1);
        // Through practice into the first measured condition.
        pass_current_trial(&mut session);
        session.advance().expect("advance");
        session
            .submit_questionnaire(WorkloadRatings::default())
            .expect("questionnaire");
        session.acknowledge_transition().expect("transition");

        session.video_ended().expect("video end");
        assert!(!session.submit_guess("0000").expect("guess").completed);
        assert!(!session.submit_guess("0001").expect("guess").completed);
        let third = session.submit_guess("0002").expect("guess");
        assert!(third.completed);
        assert!(!third.correct);
        assert_eq!(third.attempt, 3);

        assert_eq!(session.advance().expect("advance"), NextAction::NextVideo(2));
        assert_eq!(session.current_trial().expect("trial").attempt, 1);
    }

    #[test]
    fn wrong_guesses_are_recorded_too() {
        let mut session = fresh(1);
        session.video_ended().expect("video end");
        session.submit_guess("0000").expect("guess");
        session.submit_guess(PRACTICE_PIN).expect("guess");
        let recorded: Vec<bool> = session.trials().iter().map(|r| r.correct).collect();
        assert_eq!(recorded, vec![false, true]);
    }

    #[test]
    fn full_session_walks_practice_and_all_four_conditions() {
        let mut session = fresh(2);
        let mut conditions_seen = vec![session.current_condition()];

        loop {
            match session.phase() {
                SessionPhase::Trial => {
                    pass_current_trial(&mut session);
                    session.advance().expect("advance");
                }
                SessionPhase::Questionnaire => {
                    session
                        .submit_questionnaire(WorkloadRatings::default())
                        .expect("questionnaire");
                }
                SessionPhase::Transition => {
                    if let TransitionOutcome::NextCondition(next) =
                        session.acknowledge_transition().expect("transition")
                    {
                        conditions_seen.push(next);
                    }
                }
                SessionPhase::Finished => break,
            }
        }

        // Practice plus the participant's full order, in order.
        assert_eq!(conditions_seen.len(), 5);
        assert_eq!(conditions_seen[0], SessionCondition::Practice);
        let expected: Vec<SessionCondition> = session
            .condition_order()
            .iter()
            .map(|&c| SessionCondition::Measured(c))
            .collect();
        assert_eq!(&conditions_seen[1..], expected.as_slice());

        let (trials, workloads) = session.into_logs();
        assert_eq!(trials.len(), 21); // 1 practice + 4 conditions x 5 videos
        assert_eq!(workloads.len(), 5);
        assert!(trials.iter().all(|t| t.correct));
    }

    #[test]
    fn stimulus_order_is_reproducible_per_participant() {
        let a = fresh(3);
        let b = fresh(3);
        let set_a = a.stimulus_set_for(SessionCondition::Measured(Condition::RandomKeypad));
        let set_b = b.stimulus_set_for(SessionCondition::Measured(Condition::RandomKeypad));
        assert_eq!(set_a.expect("set"), set_b.expect("set"));
    }

    #[test]
    fn recovery_resumes_at_first_unscored_video() {
        let participant = id(1);
        let first = Condition::NormalKeypad; // row 0, participant 1
        let mut store = MemoryStore::new();
        let mut log = Vec::new();

        let practice_pin = PinCode::parse(PRACTICE_PIN).expect("pin");
        log.push(TrialRecord {
            participant,
            condition: SessionCondition::Practice,
            video_index: 1,
            pin_code: practice_pin.clone(),
            guess: practice_pin,
            correct: true,
        });
        // Video 1 correct, video 2 out of attempts, video 3 untouched.
        let dummy = PinCode::parse("0000").expect("pin");
        log.push(TrialRecord {
            participant,
            condition: SessionCondition::Measured(first),
            video_index: 1,
            pin_code: dummy.clone(),
            guess: dummy.clone(),
            correct: true,
        });
        for _ in 0..3 {
            log.push(TrialRecord {
                participant,
                condition: SessionCondition::Measured(first),
                video_index: 2,
                pin_code: dummy.clone(),
                guess: dummy.clone(),
                correct: false,
            });
        }
        store.put(participant, &log).expect("seed store");

        let session = Session::start(
            participant,
            StudyConfig::default(),
            BuiltinCatalogue,
            store,
        )
        .expect("session");

        assert_eq!(session.phase(), SessionPhase::Trial);
        assert_eq!(
            session.current_condition(),
            SessionCondition::Measured(first)
        );
        let trial = session.current_trial().expect("trial");
        assert_eq!(trial.video_index, 3);
        assert_eq!(trial.attempt, 1);
        assert_eq!(trial.state, TrialState::Presenting);
    }

    #[test]
    fn fully_scored_log_recovers_as_finished() {
        let participant = id(4);
        let mut store = MemoryStore::new();
        let dummy = PinCode::parse("0000").expect("pin");
        let mut log = vec![TrialRecord {
            participant,
            condition: SessionCondition::Practice,
            video_index: 1,
            pin_code: dummy.clone(),
            guess: dummy.clone(),
            correct: true,
        }];
        for condition in Condition::ALL {
            for video_index in 1..=5 {
                log.push(TrialRecord {
                    participant,
                    condition: SessionCondition::Measured(condition),
                    video_index,
                    pin_code: dummy.clone(),
                    guess: dummy.clone(),
                    correct: true,
                });
            }
        }
        store.put(participant, &log).expect("seed store");

        let session = Session::start(
            participant,
            StudyConfig::default(),
            BuiltinCatalogue,
            store,
        )
        .expect("session");
        assert!(session.phase().is_finished());
        assert_eq!(session.trials().len(), 21);
    }

    #[test]
    fn questionnaire_outside_its_phase_is_refused() {
        let mut session = fresh(1);
        let err = session
            .submit_questionnaire(WorkloadRatings::default())
            .expect_err("must refuse");
        assert!(matches!(err, SessionError::WrongPhase { .. }));
        assert!(!err.is_recoverable());
    }
}
