use clap::Args;
use entrylab::config::AnalysisConfig;
use entrylab::error::{EntryLabError, EntryResult};
use entrylab::metrics::{blind_accuracy, perfect_accuracy, ChallengeMetrics};
use entrylab::trial::{ChallengeType, TrialSet};

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub config: AnalysisConfig,

    /// Position of the challenge among all loaded challenges (0-based).
    #[arg(short, long, default_value_t = 0)]
    pub index: usize,
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| format!("{:.3}", x)).unwrap_or_else(|| "-".to_string())
}

pub fn run(args: &InspectArgs, set: &TrialSet, config: &AnalysisConfig) -> EntryResult<()> {
    let total = set.challenge_count();
    let challenge = set.challenges().nth(args.index).ok_or_else(|| {
        EntryLabError::Config(format!(
            "challenge index {} out of range ({} challenges loaded)",
            args.index, total
        ))
    })?;

    println!("\n🔎 === CHALLENGE #{} of {} === 🔎", args.index, total);
    println!("type:       {}", challenge.kind);
    println!("layout:     {}", challenge.layout);
    println!("prompt:     {:?}", challenge.prompt);
    println!("output:     {:?}", challenge.output);
    println!(
        "time:       start {:.3}, stop {}, duration {}",
        challenge.time.start,
        fmt_opt(challenge.time.stop),
        fmt_opt(challenge.time.duration)
    );
    println!("keypresses: {}", challenge.keypresses.len());
    for kp in &challenge.keypresses {
        println!(
            "  {:>12}  key {:<4} pressPos {:<32} rot {}",
            kp.id,
            kp.key.as_deref().unwrap_or("?"),
            kp.press_pos
                .map(|p| format!("{:?}", p))
                .unwrap_or_else(|| "-".to_string()),
            kp.rotation()
                .map(|r| format!("{:?}", r))
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    let harness_accuracy = match challenge.kind {
        ChallengeType::Perfect => {
            perfect_accuracy(&challenge.prompt, challenge.keypresses.len()).ok()
        }
        ChallengeType::Blind | ChallengeType::Practice => {
            Some(blind_accuracy(&challenge.prompt, &challenge.output))
        }
    };
    println!(
        "accuracy:   recorded {}, recomputed {}",
        fmt_opt(challenge.recorded_accuracy),
        fmt_opt(harness_accuracy)
    );

    let m = ChallengeMetrics::extract(challenge, &config.calibration)?;
    println!("\n--- Metrics ---");
    println!("WPM:         {:.3}", m.wpm);
    println!("aWPM:        {:.3}", m.awpm);
    println!("Error rate:  {:.2}%", m.error_rate);
    println!("Rot travel:  {:.3}", m.rotational_travel);
    println!("Pos travel:  {:.3}", m.positional_travel);
    println!("Ideal:       {}", fmt_opt(m.ideal_travel));
    println!("PIT:         {}", fmt_opt(m.pit));
    println!(
        "Edits:       dipped {}, off-by-one {}, exact {}, other {}, unplaced {}",
        m.edits.dipped, m.edits.off_by_one, m.edits.exact, m.edits.other, m.edits.unplaced
    );
    Ok(())
}
