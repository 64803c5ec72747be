use entrylab::aggregate::{AggregateStats, LayoutStats};
use entrylab::error::EntryResult;
use entrylab::stats::Distribution;
use entrylab::trial::{ChallengeType, Layout};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct SummaryRow {
    layout: Layout,
    challenges: usize,
    blind_wpm_mean: Option<f64>,
    blind_wpm_std: Option<f64>,
    blind_awpm_mean: Option<f64>,
    blind_awpm_std: Option<f64>,
    perfect_wpm_mean: Option<f64>,
    perfect_wpm_std: Option<f64>,
    perfect_awpm_mean: Option<f64>,
    perfect_awpm_std: Option<f64>,
    travel_mean: Option<f64>,
    travel_std: Option<f64>,
    pit_mean: Option<f64>,
    pit_std: Option<f64>,
    error_rate_mean: Option<f64>,
    error_rate_std: Option<f64>,
}

fn pair(d: Option<&Distribution>) -> (Option<f64>, Option<f64>) {
    d.map(|d| (d.mean, d.std_dev)).unwrap_or((None, None))
}

impl SummaryRow {
    fn from_stats(s: &LayoutStats) -> Self {
        let blind = s.speed_for(ChallengeType::Blind);
        let perfect = s.speed_for(ChallengeType::Perfect);

        let (blind_wpm_mean, blind_wpm_std) = pair(blind.map(|x| &x.wpm));
        let (blind_awpm_mean, blind_awpm_std) = pair(blind.map(|x| &x.awpm));
        let (perfect_wpm_mean, perfect_wpm_std) = pair(perfect.map(|x| &x.wpm));
        let (perfect_awpm_mean, perfect_awpm_std) = pair(perfect.map(|x| &x.awpm));
        let (travel_mean, travel_std) = pair(s.travel.as_ref());
        let (pit_mean, pit_std) = pair(s.pit.as_ref());
        let (error_rate_mean, error_rate_std) = pair(Some(&s.error_rate));

        Self {
            layout: s.layout,
            challenges: s.challenges,
            blind_wpm_mean,
            blind_wpm_std,
            blind_awpm_mean,
            blind_awpm_std,
            perfect_wpm_mean,
            perfect_wpm_std,
            perfect_awpm_mean,
            perfect_awpm_std,
            travel_mean,
            travel_std,
            pit_mean,
            pit_std,
            error_rate_mean,
            error_rate_std,
        }
    }
}

#[derive(Serialize)]
struct ChallengeRow<'a> {
    layout: Layout,
    kind: ChallengeType,
    prompt: &'a str,
    output: &'a str,
    keypresses: usize,
    wpm: f64,
    awpm: f64,
    error_rate: f64,
    rotational_travel: f64,
    positional_travel: f64,
    ideal_travel: Option<f64>,
    pit: Option<f64>,
    dipped: usize,
    off_by_one: usize,
    same_bin: usize,
    other_edits: usize,
}

#[derive(Serialize)]
struct PositionRow {
    layout: Layout,
    x: f64,
    y: f64,
    z: f64,
}

const SUMMARY_HEADER: [&str; 16] = [
    "layout",
    "challenges",
    "blind_wpm_mean",
    "blind_wpm_std",
    "blind_awpm_mean",
    "blind_awpm_std",
    "perfect_wpm_mean",
    "perfect_wpm_std",
    "perfect_awpm_mean",
    "perfect_awpm_std",
    "travel_mean",
    "travel_std",
    "pit_mean",
    "pit_std",
    "error_rate_mean",
    "error_rate_std",
];

/// One row per layout: mean/std pairs for every summarized metric.
/// The header is written even when there are no layouts.
pub fn write_summary_csv(path: &Path, stats: &AggregateStats) -> EntryResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    wtr.write_record(SUMMARY_HEADER)?;
    for s in stats.layouts.values() {
        wtr.serialize(SummaryRow::from_stats(s))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_challenges_csv(path: &Path, stats: &AggregateStats) -> EntryResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for m in &stats.per_challenge {
        wtr.serialize(ChallengeRow {
            layout: m.layout,
            kind: m.kind,
            prompt: &m.prompt,
            output: &m.output,
            keypresses: m.keypresses,
            wpm: m.wpm,
            awpm: m.awpm,
            error_rate: m.error_rate,
            rotational_travel: m.rotational_travel,
            positional_travel: m.positional_travel,
            ideal_travel: m.ideal_travel,
            pit: m.pit,
            dipped: m.edits.dipped,
            off_by_one: m.edits.off_by_one,
            same_bin: m.edits.exact,
            other_edits: m.edits.other,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_positions_csv(path: &Path, stats: &AggregateStats) -> EntryResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for s in stats.layouts.values() {
        for p in &s.positions {
            wtr.serialize(PositionRow {
                layout: s.layout,
                x: p[0],
                y: p[1],
                z: p[2],
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}
