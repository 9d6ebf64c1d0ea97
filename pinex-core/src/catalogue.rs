use crate::condition::Condition;
use crate::error::CatalogueError;
use crate::stimulus::{PinCode, Stimulus, VideoRef};

/// Source of the per-condition stimulus lists. Presentation-side asset
/// loading lives behind this; the session only sees an ordered list or a
/// failure.
pub trait StimulusCatalogue {
    /// Stimuli belonging to `condition`'s tag, in catalogue order. The
    /// caller applies any per-participant reordering.
    fn stimuli_for(&self, condition: Condition) -> Result<Vec<Stimulus>, CatalogueError>;
}

/// The fixed study catalogue: 20 videos, 5 per tag, the expected code
/// embedded in each asset name after the underscore.
const STUDY_VIDEOS: [&str; 20] = [
    "A_4062", "A_5268", "A_5301", "A_6510", "A_9289", // normal keypad
    "B_1745", "B_5610", "B_7441", "B_7814", "B_9373", // random keypad, shuffled once
    "C_1114", "C_4960", "C_5201", "C_7865", "C_9216", // random keypad
    "D_3502", "D_5294", "D_7500", "D_8831", "D_9953", // drawing touchscreen
];

/// Catalogue backed by the built-in study video table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalogue;

impl StimulusCatalogue for BuiltinCatalogue {
    fn stimuli_for(&self, condition: Condition) -> Result<Vec<Stimulus>, CatalogueError> {
        let tag = condition.tag().letter();
        let stimuli = STUDY_VIDEOS
            .iter()
            .filter(|name| name.starts_with(tag))
            .map(|name| {
                let digits = name.split_once('_').map(|(_, d)| d).unwrap_or_default();
                Stimulus::Catalogue {
                    video: VideoRef(name.to_string()),
                    pin: PinCode::known(digits),
                }
            })
            .collect::<Vec<_>>();
        if stimuli.is_empty() {
            return Err(CatalogueError::EmptySet { condition });
        }
        Ok(stimuli)
    }
}
