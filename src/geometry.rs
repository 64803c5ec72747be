use crate::config::Calibration;
use crate::error::{EntryLabError, EntryResult};
use crate::trial::Layout;
use serde::Serialize;

/// Letters per ArcType bin / TiltType row.
pub const LETTERS_PER_BIN: i32 = 4;
/// ceil(26 / 4)
pub const BIN_COUNT: i32 = 7;
/// Columns of a TiltType row.
pub const TILT_COLUMNS: i32 = 4;

/// Bin index of the space character, just past the last letter bin.
pub const SPACE_BIN: i32 = BIN_COUNT;
pub const TILT_SPACE: Coord = Coord::Cell {
    primary: BIN_COUNT,
    secondary: 0,
};

const QWERTY_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];
const QWERTY_SPACE: Coord = Coord::Cell {
    primary: 4,
    secondary: 3,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Coord {
    /// One-axis position (ArcType).
    Bin(i32),
    /// Two-axis position. TiltType: (row, column); Raycast: (column, row).
    Cell { primary: i32, secondary: i32 },
}

impl Coord {
    pub fn axes(self) -> (i32, i32) {
        match self {
            Coord::Bin(b) => (b, 0),
            Coord::Cell { primary, secondary } => (primary, secondary),
        }
    }

    /// Signed per-axis displacement `to - self`.
    pub fn displacement(self, to: Coord) -> (i32, i32) {
        let (a0, a1) = self.axes();
        let (b0, b1) = to.axes();
        (b0 - a0, b1 - a1)
    }
}

/// Ideal travel split by axis; `z` is zero for one-axis layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IdealTravel {
    pub x: f64,
    pub z: f64,
}

impl IdealTravel {
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.z * self.z).sqrt()
    }
}

fn letter_index(c: char) -> EntryResult<i32> {
    if !c.is_ascii_alphabetic() {
        return Err(EntryLabError::InvalidCharacter(c));
    }
    Ok((c.to_ascii_lowercase() as u8 - b'a') as i32)
}

fn qwerty_cell(c: char) -> Option<Coord> {
    if c == ' ' {
        return Some(QWERTY_SPACE);
    }
    let lower = c.to_ascii_lowercase();
    QWERTY_ROWS.iter().enumerate().find_map(|(row, keys)| {
        keys.find(lower).map(|col| Coord::Cell {
            primary: col as i32,
            secondary: row as i32,
        })
    })
}

/// Characters every layout accepts as geometry input.
pub fn is_mappable(c: char) -> bool {
    c == ' ' || c.is_alphabetic()
}

/// Maps `c` to its coordinate on `layout`.
///
/// Anything that is neither alphabetic nor a space is rejected. `Ok(None)` means the
/// character is valid but has no position on this layout (SliderOnly has no discrete
/// geometry; Raycast only knows the QWERTY letters).
pub fn bin_of(layout: Layout, c: char) -> EntryResult<Option<Coord>> {
    if !is_mappable(c) {
        return Err(EntryLabError::InvalidCharacter(c));
    }

    match layout {
        Layout::ArcType => {
            if c == ' ' {
                return Ok(Some(Coord::Bin(SPACE_BIN)));
            }
            Ok(Some(Coord::Bin(letter_index(c)? / LETTERS_PER_BIN)))
        }
        Layout::TiltType => {
            if c == ' ' {
                return Ok(Some(TILT_SPACE));
            }
            let idx = letter_index(c)?;
            Ok(Some(Coord::Cell {
                primary: idx / LETTERS_PER_BIN,
                secondary: idx % LETTERS_PER_BIN,
            }))
        }
        Layout::Raycast => Ok(qwerty_cell(c)),
        Layout::SliderOnly => Ok(None),
    }
}

/// Keeps only ASCII letters and spaces, the characters every layout can place or skip.
pub fn sanitize_prompt(text: &str) -> String {
    text.chars()
        .filter(|&c| c == ' ' || c.is_ascii_alphabetic())
        .collect()
}

/// Ideal travel with the default calibration.
pub fn ideal_travel(layout: Layout, prompt: &str) -> EntryResult<IdealTravel> {
    ideal_travel_with(layout, prompt, &Calibration::default())
}

/// Distance a perfectly efficient user would move to enter `prompt` on `layout`.
///
/// Sums, over consecutive character pairs, the per-axis coordinate delta scaled by the
/// layout's range-size / bin-count. Pairs involving an unplaceable character add nothing.
pub fn ideal_travel_with(
    layout: Layout,
    prompt: &str,
    cal: &Calibration,
) -> EntryResult<IdealTravel> {
    let (x_scale, z_scale) = match layout {
        Layout::ArcType => (cal.arc_x_range / BIN_COUNT as f64, 0.0),
        Layout::TiltType => (
            cal.tilt_x_range / BIN_COUNT as f64,
            cal.tilt_z_range / TILT_COLUMNS as f64,
        ),
        Layout::Raycast => (cal.raycast_key_width, cal.raycast_key_height),
        Layout::SliderOnly => (0.0, 0.0),
    };

    let mut total = IdealTravel::default();
    let mut last: Option<Option<Coord>> = None;

    for c in prompt.chars() {
        let here = bin_of(layout, c)?;
        if let Some(Some(prev)) = last {
            if let Some(cur) = here {
                let (dx, dz) = prev.displacement(cur);
                total.x += dx.abs() as f64 * x_scale;
                total.z += dz.abs() as f64 * z_scale;
            }
        }
        last = Some(here);
    }

    Ok(total)
}
