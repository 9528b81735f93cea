// Terminal rendering of the public surfaces: the ranking table and the
// contestant grid.

use poll_core::{bar_percent, RankEntry};

const BAR_WIDTH: usize = 20;

fn progress_bar(votes: u64, max_votes: u64) -> String {
    let percent = bar_percent(votes, max_votes);
    let filled = (percent as usize) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        " ".repeat(BAR_WIDTH - filled),
        percent
    )
}

fn name_width(entries: &[RankEntry]) -> usize {
    entries
        .iter()
        .map(|e| e.contestant.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Contestant".len())
}

/// The live ranking: rank, name, vote count and a proportional progress
/// bar scaled to the current leader.
pub fn ranking_table(entries: &[RankEntry]) -> String {
    if entries.is_empty() {
        return "No contestants yet, nothing to show.".to_string();
    }
    let max_votes = entries.iter().map(|e| e.votes).max().unwrap_or(0);
    let width = name_width(entries);

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "{:<5} {:<width$} {:>5}  Progress",
        "Rank",
        "Contestant",
        "Votes",
        width = width
    ));
    for (i, entry) in entries.iter().enumerate() {
        lines.push(format!(
            "#{:<4} {:<width$} {:>5}  {}",
            i + 1,
            entry.contestant.name,
            entry.votes,
            progress_bar(entry.votes, max_votes),
            width = width
        ));
    }
    lines.join("\n")
}

/// The voting grid as a list: identifier, name and live count per contestant.
pub fn contestant_list(entries: &[RankEntry]) -> String {
    if entries.is_empty() {
        return "No contestants yet.".to_string();
    }
    let width = name_width(entries);
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "{:<16} {:<width$} {:>5}",
        "Id",
        "Contestant",
        "Votes",
        width = width
    ));
    for entry in entries.iter() {
        lines.push(format!(
            "{:<16} {:<width$} {:>5}",
            entry.contestant.id,
            entry.contestant.name,
            entry.votes,
            width = width
        ));
    }
    lines.join("\n")
}
