//! Playing through problems: feedback, exploration, hints.

mod common;

use sgf_core::coord::Point;
use sgf_core::{Hint, Rank, RankScheme};
use tsumego_trainer::session::{feedback, Session, NO_HINT_MESSAGE};

use common::{branch_ranks, corner_problem};

fn pt(s: &str) -> Option<Point> {
    Some(Point::parse(s).unwrap())
}

#[test]
fn test_wrong_line_outcome() {
    let mut session = Session::new(&corner_problem(), RankScheme::Fine).unwrap();
    let outcome = session.play(pt("bc")).unwrap();
    assert_eq!(outcome.rank, Rank::Wrong);
    assert_eq!(outcome.message, "Wrong. Retry.");
    assert_eq!(session.hint(), Hint::NoneRemaining);
}

#[test]
fn test_feedback_texts() {
    assert_eq!(feedback(Rank::Correct), "Correct.");
    assert_eq!(feedback(Rank::Interesting), "Correct solution, but there is a better move.");
    assert_eq!(feedback(Rank::Unknown), "Unknown move; probably incorrect.");
    assert_eq!(NO_HINT_MESSAGE, "Already wrong variation. Try again.");
}

#[test]
fn test_coarse_scheme() {
    let session = Session::new(&corner_problem(), RankScheme::Coarse).unwrap();
    assert_eq!(branch_ranks(&session), vec![Rank::Correct, Rank::Wrong, Rank::Wrong]);
}

#[test]
fn test_explore_then_reset() {
    let mut session = Session::new(&corner_problem(), RankScheme::Fine).unwrap();
    session.play(pt("ba"));
    let outcome = session.play(pt("ea")).unwrap();
    assert_eq!(outcome.rank, Rank::Unknown);
    assert!(session.current().is_exploratory());

    // exploratory nodes never reach the exported tree
    assert_eq!(session.kifu().to_game_tree(), corner_problem());

    session.undo();
    assert_eq!(session.path(), &[0, 0]);
    assert_eq!(session.current().children.len(), 1);

    session.play(pt("ea"));
    session.reset();
    assert!(session.at_start());
    assert_eq!(session.kifu().to_game_tree(), corner_problem());
    assert_eq!(session.hint(), Hint::Move(0));
}

#[test]
fn test_markers_follow_ranks() {
    let session = Session::new(&corner_problem(), RankScheme::Fine).unwrap();
    let markers = session.variation_markers();
    let labels: Vec<char> = markers.iter().map(|m| m.label).collect();
    assert_eq!(labels, vec!['A', 'B', 'C']);
    assert!(markers[0].correct);
    assert!(!markers[1].correct);
    assert_eq!(markers[2].point, Point::parse("bc").unwrap());
}

#[test]
fn test_next_out_of_range() {
    let mut session = Session::new(&corner_problem(), RankScheme::Fine).unwrap();
    assert_eq!(session.next(9), None);
    assert!(session.at_start());
}
