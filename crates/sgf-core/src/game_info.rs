//! Human-readable game information from the root node.

use crate::game_tree::Node;

/// Labeled scalar properties, in display order after the players.
const INFO_FIELDS: &[(&str, &str)] = &[
    ("DT", "Date"),
    ("KM", "Komi"),
    ("RE", "Result"),
    ("EV", "Event"),
    ("RO", "Round"),
    ("PC", "Place"),
];

/// Summary lines for a game-info node. Absent properties are left out.
/// `notes` (problem metadata from outside the tree) comes after the labeled
/// fields; the game comment (GC) follows last, after an empty line.
pub fn summarize(node: &Node, notes: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();

    for (name_ident, rank_ident, label) in [("PW", "WR", "White"), ("PB", "BR", "Black")] {
        if let Some(name) = node.value_string(name_ident) {
            match node.value_string(rank_ident) {
                Some(rank) => lines.push(format!("{label}: {name} ({rank})")),
                None => lines.push(format!("{label}: {name}")),
            }
        }
    }

    for (ident, label) in INFO_FIELDS {
        if let Some(value) = node.value_string(ident) {
            lines.push(format!("{label}: {value}"));
        }
    }

    lines.extend(notes.map(str::to_string));

    if let Some(comment) = node.value_string("GC") {
        lines.push(String::new());
        lines.push(comment);
    }

    lines
}
