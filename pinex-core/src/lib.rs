pub mod catalogue;
pub mod condition;
pub mod error;
pub mod participant;
pub mod phase;
pub mod record;
pub mod stimulus;

pub use catalogue::{BuiltinCatalogue, StimulusCatalogue};
pub use condition::{Condition, ConditionOrder, SessionCondition, StimulusTag};
pub use error::{CatalogueError, GuessError, SequenceError};
pub use participant::ParticipantId;
pub use phase::SessionPhase;
pub use record::{TrialRecord, WorkloadRatings, WorkloadRecord};
pub use stimulus::{PinCode, Stimulus, TrialState, VideoRef, PRACTICE_PIN};
