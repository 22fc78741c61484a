//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use serde_json::json;
use sgf_core::GameTree;
use tsumego_trainer::collection::Problem;

/// Black lives in the upper left.
///
/// - B[ba] W[ca] B[da]: correct, with a comment
/// - B[ab]: doubtful
/// - B[bc] W[bd]: wrong
pub fn corner_problem() -> GameTree {
    serde_json::from_value(json!([
        [{ "PB": "Problem", "AB": ["cc", "dc"], "AW": ["bb", "cb"], "LB": [["dd", "1"]], "VW": [["aa", "jj"]] }],
        [
            [[{ "B": "ba" }, { "W": "ca" }, { "B": "da", "GB": "", "C": "Black lives." }], []],
            [[{ "B": "ab", "DO": "" }], []],
            [[{ "B": "bc" }, { "W": "bd" }], []]
        ]
    ]))
    .unwrap()
}

pub fn problem(id: &str, topics: &[&str], sgf: GameTree) -> Problem {
    serde_json::from_value(json!({ "id": id, "sgf": sgf, "topics": topics })).unwrap()
}

/// Ranks of the first-level variations.
pub fn branch_ranks(session: &tsumego_trainer::session::Session) -> Vec<sgf_core::Rank> {
    session.kifu().root.children.iter().map(|c| c.rank).collect()
}
