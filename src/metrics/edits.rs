use crate::error::EntryResult;
use crate::geometry::bin_of;
use crate::trial::{Challenge, Layout};
use serde::Serialize;
use strum_macros::Display;

/// Unit-cost edit distance over characters.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let s1: Vec<char> = a.chars().collect();
    let s2: Vec<char> = b.chars().collect();
    let rows = s1.len() + 1;
    let cols = s2.len() + 1;

    let mut table = vec![vec![0usize; cols]; rows];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..rows {
        for j in 1..cols {
            let substitution = if s1[i - 1] == s2[j - 1] { 0 } else { 1 };
            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + substitution);
        }
    }

    table[rows - 1][cols - 1]
}

/// Edit distance as a percentage of the longer string. Two empty strings score 0.
pub fn error_rate(prompt: &str, output: &str) -> f64 {
    let longest = prompt.chars().count().max(output.chars().count());
    if longest == 0 {
        return 0.0;
    }
    100.0 * levenshtein(prompt, output) as f64 / longest as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum EditKind {
    /// Secondary-axis displacement of exactly -1.
    Dipped,
    /// One step away on a single axis.
    OffByOne,
    /// Same coordinate, different character (e.g. two letters sharing an ArcType bin).
    Exact,
    Other,
}

/// Classifies the substitution of `prompt_char` by `output_char` on `layout`.
///
/// NOTE: the `Dipped` rule is an empirical heuristic from the first study analysis. It is
/// asymmetric (only a -1 on the secondary axis counts) and means different physical
/// motions on different layouts. It is checked before `OffByOne`.
///
/// Returns `None` when either character has no coordinate on the layout.
pub fn classify_edit(
    layout: Layout,
    prompt_char: char,
    output_char: char,
) -> EntryResult<Option<EditKind>> {
    let (from, to) = match (bin_of(layout, prompt_char)?, bin_of(layout, output_char)?) {
        (Some(f), Some(t)) => (f, t),
        _ => return Ok(None),
    };

    let (d_primary, d_secondary) = from.displacement(to);

    let kind = if d_secondary == -1 {
        EditKind::Dipped
    } else if d_primary.abs() + d_secondary.abs() == 1 {
        EditKind::OffByOne
    } else if d_primary == 0 && d_secondary == 0 {
        EditKind::Exact
    } else {
        EditKind::Other
    };
    Ok(Some(kind))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EditTally {
    pub dipped: usize,
    pub off_by_one: usize,
    pub exact: usize,
    pub other: usize,
    /// Mismatches the layout geometry could not place.
    pub unplaced: usize,
}

impl EditTally {
    pub fn record(&mut self, kind: Option<EditKind>) {
        match kind {
            Some(EditKind::Dipped) => self.dipped += 1,
            Some(EditKind::OffByOne) => self.off_by_one += 1,
            Some(EditKind::Exact) => self.exact += 1,
            Some(EditKind::Other) => self.other += 1,
            None => self.unplaced += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.dipped + self.off_by_one + self.exact + self.other + self.unplaced
    }

    pub fn absorb(&mut self, other: &EditTally) {
        self.dipped += other.dipped;
        self.off_by_one += other.off_by_one;
        self.exact += other.exact;
        self.other += other.other;
        self.unplaced += other.unplaced;
    }
}

fn placeable(c: char) -> bool {
    c == ' ' || c.is_ascii_alphabetic()
}

/// Classifies every positional mismatch between prompt and output.
pub fn edit_tally(challenge: &Challenge) -> EntryResult<EditTally> {
    let mut tally = EditTally::default();

    for (p, o) in challenge.prompt.chars().zip(challenge.output.chars()) {
        if p == o {
            continue;
        }
        if !placeable(p) || !placeable(o) {
            tally.record(None);
            continue;
        }
        tally.record(classify_edit(challenge.layout, p, o)?);
    }

    Ok(tally)
}
