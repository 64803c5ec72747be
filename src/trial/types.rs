use serde::{Deserialize, Serialize};
use serde_yml::Value;
use strum_macros::{Display, EnumIter, EnumString};

/// Input-layout condition a challenge was recorded under.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
pub enum Layout {
    SliderOnly,
    ArcType,
    TiltType,
    Raycast,
}

impl Layout {
    /// Layouts driven by controller rotation, where travel and PIT are meaningful.
    pub fn tracks_rotation(self) -> bool {
        match self {
            Layout::ArcType | Layout::TiltType => true,
            Layout::SliderOnly | Layout::Raycast => false,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
pub enum ChallengeType {
    // no backspaces, no viewing output
    Blind,
    // must be 100% correct to advance
    Perfect,
    // may be skipped at any time
    Practice,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub stop: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

impl TimeSpan {
    /// Duration in seconds, if it was recorded and is strictly positive.
    pub fn positive_duration(&self) -> Option<f64> {
        self.duration.filter(|d| *d > 0.0)
    }
}

pub type Vec3 = [f64; 3];

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Travel {
    pub pos: Option<Vec3>,
    pub rot: Option<Vec3>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keypress {
    /// Recorded key of the keypress mapping (the press timestamp, as text).
    pub id: String,
    pub key: Option<String>,
    pub press_pos: Option<Vec3>,
    pub travel: Option<Travel>,
}

impl Keypress {
    /// Builds a keypress from one `id: {...}` entry, treating malformed fields as absent.
    pub fn from_value(id: String, body: &Value) -> Self {
        let travel = body.get("travel").map(|t| Travel {
            pos: t.get("pos").and_then(vec3),
            rot: t.get("rot").and_then(vec3),
        });

        Self {
            id,
            key: body.get("key").and_then(Value::as_str).map(str::to_string),
            press_pos: body.get("pressPos").and_then(vec3),
            travel,
        }
    }

    pub fn rotation(&self) -> Option<Vec3> {
        self.travel.and_then(|t| t.rot)
    }

    pub fn translation(&self) -> Option<Vec3> {
        self.travel.and_then(|t| t.pos)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Challenge {
    pub kind: ChallengeType,
    pub layout: Layout,
    pub prompt: String,
    pub output: String,
    /// Accuracy as computed by the recording harness, when it wrote a number.
    pub recorded_accuracy: Option<f64>,
    pub time: TimeSpan,
    pub keypresses: Vec<Keypress>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TrialItem {
    Challenge(Challenge),
    Command { key: String, data: Option<String> },
}

impl TrialItem {
    pub fn as_challenge(&self) -> Option<&Challenge> {
        match self {
            TrialItem::Challenge(c) => Some(c),
            TrialItem::Command { .. } => None,
        }
    }
}

/// Header block written at the top of every trial record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialMeta {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub unixseconds: Option<i64>,
    #[serde(default)]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Provenance {
    Source { id: String },
    /// Several records were concatenated; which item came from where is lost.
    Merged,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialSet {
    pub provenance: Provenance,
    pub meta: Option<TrialMeta>,
    pub items: Vec<TrialItem>,
    /// Entries that were neither a readable challenge nor a command.
    pub skipped: usize,
}

impl TrialSet {
    pub fn challenges(&self) -> impl Iterator<Item = &Challenge> {
        self.items.iter().filter_map(TrialItem::as_challenge)
    }

    pub fn challenge_count(&self) -> usize {
        self.challenges().count()
    }

    pub fn is_merged(&self) -> bool {
        self.provenance == Provenance::Merged
    }
}

pub(crate) fn vec3(v: &Value) -> Option<Vec3> {
    let seq = v.as_sequence()?;
    if seq.len() != 3 {
        return None;
    }
    Some([seq[0].as_f64()?, seq[1].as_f64()?, seq[2].as_f64()?])
}

pub(crate) fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
