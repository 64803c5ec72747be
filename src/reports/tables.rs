use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use entrylab::aggregate::AggregateStats;
use entrylab::stats::Distribution;
use entrylab::trial::ChallengeType;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn fmt_dist(d: Option<&Distribution>, precision: usize) -> String {
    match d.and_then(|d| d.mean.zip(d.std_dev)) {
        Some((mean, std)) => format!("{:.*} ± {:.*}", precision, mean, precision, std),
        None => "-".to_string(),
    }
}

fn fmt_count(d: Option<&Distribution>) -> String {
    match d {
        Some(d) if d.dropped() > 0 => format!("{} (-{})", d.len(), d.dropped()),
        Some(d) => d.len().to_string(),
        None => "-".to_string(),
    }
}

pub fn speed(stats: &AggregateStats) {
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Layout").add_attribute(Attribute::Bold),
        Cell::new("Type"),
        Cell::new("N"),
        Cell::new("WPM").fg(Color::Cyan),
        Cell::new("aWPM").fg(Color::Green),
    ]);
    align_right(&mut table, 2..=4);

    for (layout, s) in &stats.layouts {
        for (kind, speed) in &s.speed {
            table.add_row(vec![
                Cell::new(layout.to_string()).add_attribute(Attribute::Bold),
                Cell::new(kind.to_string()),
                Cell::new(fmt_count(Some(&speed.wpm))),
                Cell::new(fmt_dist(Some(&speed.wpm), 2)).fg(Color::Cyan),
                Cell::new(fmt_dist(Some(&speed.awpm), 2)).fg(Color::Green),
            ]);
        }
    }
    println!("\n{}", table);
}

pub fn travel(stats: &AggregateStats) {
    let rows: Vec<_> = stats
        .layouts
        .iter()
        .filter(|(layout, _)| layout.tracks_rotation())
        .collect();
    if rows.is_empty() {
        return;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Layout").add_attribute(Attribute::Bold),
        Cell::new("N"),
        Cell::new("Rot Travel"),
        Cell::new("PIT %").fg(Color::Yellow),
        Cell::new("Presses"),
    ]);
    align_right(&mut table, 1..=4);

    for (layout, s) in rows {
        table.add_row(vec![
            Cell::new(layout.to_string()).add_attribute(Attribute::Bold),
            Cell::new(fmt_count(s.travel.as_ref())),
            Cell::new(fmt_dist(s.travel.as_ref(), 1)),
            Cell::new(fmt_dist(s.pit.as_ref(), 1)).fg(Color::Yellow),
            Cell::new(s.positions.len().to_string()),
        ]);
    }
    println!("\n{}", table);
}

pub fn errors(stats: &AggregateStats) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new(format!("Layout ({})", ChallengeType::Blind)).add_attribute(Attribute::Bold),
        Cell::new("N"),
        Cell::new("Error %").fg(Color::Red),
        Cell::new("Dipped"),
        Cell::new("Off-by-1"),
        Cell::new("Same Bin"),
        Cell::new("Other"),
        Cell::new("Unplaced"),
    ]);
    align_right(&mut table, 1..=7);

    for (layout, s) in &stats.layouts {
        let e = &s.edits;
        table.add_row(vec![
            Cell::new(layout.to_string()).add_attribute(Attribute::Bold),
            Cell::new(fmt_count(Some(&s.error_rate))),
            Cell::new(fmt_dist(Some(&s.error_rate), 2)).fg(Color::Red),
            Cell::new(e.dipped.to_string()),
            Cell::new(e.off_by_one.to_string()),
            Cell::new(e.exact.to_string()),
            Cell::new(e.other.to_string()),
            Cell::new(e.unplaced.to_string()),
        ]);
    }
    println!("\n{}", table);
}
