/// Tunables of the study protocol.
#[derive(Debug, Clone)]
pub struct StudyConfig {
    /// Guesses allowed per video before the trial completes as incorrect.
    pub max_attempts: u8,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}
