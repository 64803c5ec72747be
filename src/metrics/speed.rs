use crate::error::{EntryLabError, EntryResult};
use crate::trial::Challenge;

/// Characters per "word" in the standard text-entry WPM definition.
pub const CHARS_PER_WORD: f64 = 5.0;

/// `max(0, len(output) - 1) / 5` words over the challenge duration in minutes.
///
/// A missing or non-positive duration means the record is corrupt and is an error.
pub fn words_per_minute(challenge: &Challenge) -> EntryResult<f64> {
    let duration = challenge
        .time
        .positive_duration()
        .ok_or_else(|| EntryLabError::InvalidDuration {
            prompt: challenge.prompt.clone(),
            duration: challenge.time.duration,
        })?;

    let minutes_of_entry = duration / 60.0;
    let words_entered = challenge.output.chars().count().saturating_sub(1) as f64 / CHARS_PER_WORD;
    Ok(words_entered / minutes_of_entry)
}

/// Number of positions where `output` and `prompt` hold the same character.
/// Output past the end of the prompt is ignored.
pub fn positional_matches(prompt: &str, output: &str) -> usize {
    output
        .chars()
        .zip(prompt.chars())
        .filter(|(a, b)| a == b)
        .count()
}

/// WPM scaled by the fraction of prompt characters reproduced in place.
pub fn accurate_words_per_minute(challenge: &Challenge) -> EntryResult<f64> {
    let prompt_len = challenge.prompt.chars().count();
    if prompt_len == 0 {
        return Err(EntryLabError::EmptyPrompt);
    }
    let ratio = positional_matches(&challenge.prompt, &challenge.output) as f64 / prompt_len as f64;
    Ok(ratio * words_per_minute(challenge)?)
}

/// Accuracy of a Blind challenge as the recording harness scores it:
/// positional matches over the longer of the two strings.
pub fn blind_accuracy(prompt: &str, output: &str) -> f64 {
    let longest = prompt.chars().count().max(output.chars().count());
    if longest == 0 {
        return 0.0;
    }
    positional_matches(prompt, output) as f64 / longest as f64
}

/// Accuracy of a Perfect challenge as the harness scores it: keypresses spent per
/// prompt character. 1.0 is a clean run; corrections push it above 1.
pub fn perfect_accuracy(prompt: &str, keypress_count: usize) -> EntryResult<f64> {
    let prompt_len = prompt.chars().count();
    if prompt_len == 0 {
        return Err(EntryLabError::EmptyPrompt);
    }
    Ok(keypress_count as f64 / prompt_len as f64)
}
