pub mod config;
pub mod questionnaire;
pub mod sequencer;
pub mod session;
pub mod trial;

pub use config::StudyConfig;
pub use questionnaire::{WorkloadDimension, WORKLOAD_DIMENSIONS};
pub use sequencer::{condition_order_for, deterministic_shuffle, LATIN_SQUARE};
pub use session::{Session, SessionError, TransitionOutcome};
pub use trial::{ActiveTrial, GuessFeedback, NextAction};
