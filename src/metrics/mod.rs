pub mod edits;
pub mod speed;
pub mod travel;

pub use self::edits::{classify_edit, edit_tally, error_rate, levenshtein, EditKind, EditTally};
pub use self::speed::{
    accurate_words_per_minute, blind_accuracy, perfect_accuracy, words_per_minute,
};
pub use self::travel::{percent_of_ideal, positional_travel, rotational_travel};

use crate::config::Calibration;
use crate::error::EntryResult;
use crate::geometry::{ideal_travel_with, sanitize_prompt};
use crate::trial::{Challenge, ChallengeType, Layout};
use serde::Serialize;

/// Every per-challenge metric, computed once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChallengeMetrics {
    pub layout: Layout,
    pub kind: ChallengeType,
    pub prompt: String,
    pub output: String,
    pub keypresses: usize,

    pub wpm: f64,
    pub awpm: f64,
    pub error_rate: f64,

    pub rotational_travel: f64,
    pub positional_travel: f64,
    /// Only for layouts driven by rotation.
    pub ideal_travel: Option<f64>,
    pub pit: Option<f64>,

    pub edits: EditTally,
}

impl ChallengeMetrics {
    pub fn extract(challenge: &Challenge, cal: &Calibration) -> EntryResult<Self> {
        let wpm = words_per_minute(challenge)?;
        let awpm = accurate_words_per_minute(challenge)?;
        let rot = rotational_travel(challenge);

        let ideal_travel = if challenge.layout.tracks_rotation() {
            let prompt = sanitize_prompt(&challenge.prompt);
            Some(ideal_travel_with(challenge.layout, &prompt, cal)?.norm())
        } else {
            None
        };
        let pit = ideal_travel.and_then(|ideal| percent_of_ideal(rot, ideal));

        Ok(Self {
            layout: challenge.layout,
            kind: challenge.kind,
            prompt: challenge.prompt.clone(),
            output: challenge.output.clone(),
            keypresses: challenge.keypresses.len(),
            wpm,
            awpm,
            error_rate: error_rate(&challenge.prompt, &challenge.output),
            rotational_travel: rot,
            positional_travel: positional_travel(challenge),
            ideal_travel,
            pit,
            edits: edit_tally(challenge)?,
        })
    }
}
