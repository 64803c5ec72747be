use crate::config::{AnalysisConfig, Calibration};
use crate::error::EntryResult;
use crate::metrics::{ChallengeMetrics, EditTally};
use crate::stats::{Distribution, DEFAULT_OUTLIER_M};
use crate::trial::{ChallengeType, Layout, TrialSet, Vec3};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateOptions {
    pub outlier_m: f64,
    pub include_practice: bool,
    pub calibration: Calibration,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            outlier_m: DEFAULT_OUTLIER_M,
            include_practice: false,
            calibration: Calibration::default(),
        }
    }
}

impl From<&AnalysisConfig> for AggregateOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            outlier_m: config.outlier_m,
            include_practice: config.include_practice,
            calibration: config.calibration,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpeedStats {
    pub wpm: Distribution,
    pub awpm: Distribution,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutStats {
    pub layout: Layout,
    pub challenges: usize,
    /// Blind and Perfect are kept apart; Practice appears only when requested.
    pub speed: BTreeMap<ChallengeType, SpeedStats>,
    /// Rotational travel. `None` for layouts without a rotation concept.
    pub travel: Option<Distribution>,
    pub pit: Option<Distribution>,
    /// Blind challenges only.
    pub error_rate: Distribution,
    /// Blind challenges only.
    pub edits: EditTally,
    /// Raw press positions, not outlier filtered. Practice presses are only included
    /// when practice challenges are; see [`extract_layout_positions`] for every press.
    pub positions: Vec<Vec3>,
}

impl LayoutStats {
    pub fn speed_for(&self, kind: ChallengeType) -> Option<&SpeedStats> {
        self.speed.get(&kind)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    pub layouts: BTreeMap<Layout, LayoutStats>,
    pub per_challenge: Vec<ChallengeMetrics>,
    pub excluded_practice: usize,
}

#[derive(Default)]
struct Bucket {
    challenges: usize,
    wpm: BTreeMap<ChallengeType, (Vec<f64>, Vec<f64>)>,
    travel: Vec<f64>,
    pit: Vec<f64>,
    error_rate: Vec<f64>,
    edits: EditTally,
    positions: Vec<Vec3>,
}

impl Bucket {
    fn finish(self, layout: Layout, m: f64) -> LayoutStats {
        let speed = self
            .wpm
            .into_iter()
            .map(|(kind, (wpm, awpm))| {
                (
                    kind,
                    SpeedStats {
                        wpm: Distribution::from_samples(wpm, m),
                        awpm: Distribution::from_samples(awpm, m),
                    },
                )
            })
            .collect();

        let (travel, pit) = if layout.tracks_rotation() {
            (
                Some(Distribution::from_samples(self.travel, m)),
                Some(Distribution::from_samples(self.pit, m)),
            )
        } else {
            (None, None)
        };

        LayoutStats {
            layout,
            challenges: self.challenges,
            speed,
            travel,
            pit,
            error_rate: Distribution::from_samples(self.error_rate, m),
            edits: self.edits,
            positions: self.positions,
        }
    }
}

/// Groups a trial set by layout and challenge type and summarizes every metric.
///
/// Extraction errors (bad durations, empty prompts) abort the whole pass.
pub fn aggregate(set: &TrialSet, opts: &AggregateOptions) -> EntryResult<AggregateStats> {
    let mut buckets: BTreeMap<Layout, Bucket> = BTreeMap::new();
    let mut per_challenge = Vec::new();
    let mut excluded_practice = 0;

    for challenge in set.challenges() {
        if challenge.kind == ChallengeType::Practice && !opts.include_practice {
            excluded_practice += 1;
            continue;
        }

        let metrics = ChallengeMetrics::extract(challenge, &opts.calibration)?;
        let bucket = buckets.entry(challenge.layout).or_default();
        bucket.challenges += 1;

        let (wpm, awpm) = bucket.wpm.entry(challenge.kind).or_default();
        wpm.push(metrics.wpm);
        awpm.push(metrics.awpm);

        match challenge.layout {
            Layout::ArcType | Layout::TiltType => {
                bucket.travel.push(metrics.rotational_travel);
                match metrics.pit {
                    Some(pit) => bucket.pit.push(pit),
                    None => debug!(
                        "No ideal travel for prompt {:?}; PIT skipped",
                        challenge.prompt
                    ),
                }
            }
            Layout::Raycast | Layout::SliderOnly => {}
        }

        bucket
            .positions
            .extend(challenge.keypresses.iter().filter_map(|kp| kp.press_pos));

        if challenge.kind == ChallengeType::Blind {
            bucket.error_rate.push(metrics.error_rate);
            bucket.edits.absorb(&metrics.edits);
        }

        per_challenge.push(metrics);
    }

    info!(
        "📊 Aggregated {} challenges across {} layouts ({} practice excluded)",
        per_challenge.len(),
        buckets.len(),
        excluded_practice
    );

    let layouts = buckets
        .into_iter()
        .map(|(layout, bucket)| (layout, bucket.finish(layout, opts.outlier_m)))
        .collect();

    Ok(AggregateStats {
        layouts,
        per_challenge,
        excluded_practice,
    })
}

/// Press positions of every keypress in challenges recorded on `layout`, Practice included.
pub fn extract_layout_positions(set: &TrialSet, layout: Layout) -> Vec<Vec3> {
    set.challenges()
        .filter(|c| c.layout == layout)
        .flat_map(|c| c.keypresses.iter().filter_map(|kp| kp.press_pos))
        .collect()
}
