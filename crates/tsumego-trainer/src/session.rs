//! Player session over one ranked kifu.
//!
//! The session owns the kifu and a path from its root to the current node.
//! User moves that the problem doesn't know are kept as exploratory nodes
//! until undo or reset removes them.

use serde::Serialize;
use sgf_core::coord::Point;
use sgf_core::{evaluate_kifu, hint, Color, GameTree, Hint, Kifu, KifuNode, Move, Rank, RankScheme, SgfError};
use tracing::debug;

/// Shown when a hint is requested but no correct continuation is left.
pub const NO_HINT_MESSAGE: &str = "Already wrong variation. Try again.";

/// Default feedback at the end of a variation without its own comment.
pub fn feedback(rank: Rank) -> &'static str {
    match rank {
        Rank::Wrong => "Wrong. Retry.",
        Rank::Doubtful => "There is a better way to solve this. Retry.",
        Rank::Interesting => "Correct solution, but there is a better move.",
        Rank::Correct => "Correct.",
        Rank::Unknown => "Unknown move; probably incorrect.",
    }
}

/// End of a variation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub rank: Rank,
    /// The node's comment if it has one, otherwise the default feedback.
    pub message: String,
}

/// Label for one of the player's candidate moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariationMarker {
    pub label: char,
    pub point: Point,
    pub correct: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    kifu: Kifu,
    path: Vec<usize>,
    turn: Color,
}

impl Session {
    /// Load a tree: convert it to a kifu, rank it, find out who plays.
    pub fn new(tree: &GameTree, scheme: RankScheme) -> Result<Self, SgfError> {
        let mut kifu = Kifu::from_game_tree(tree)?;
        let best = evaluate_kifu(&mut kifu, scheme)?;
        let turn = kifu.turn()?;
        debug!(?best, ?turn, "Session loaded");
        Ok(Self {
            kifu,
            path: Vec::new(),
            turn,
        })
    }

    pub fn kifu(&self) -> &Kifu {
        &self.kifu
    }

    /// The player's color.
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn at_start(&self) -> bool {
        self.path.is_empty()
    }

    pub fn current(&self) -> &KifuNode {
        self.kifu.node_at(&self.path).unwrap_or(&self.kifu.root)
    }

    fn current_color(&self) -> Option<Color> {
        self.current().mv().ok().flatten().map(|m| m.color)
    }

    /// Color of the next move from the current position.
    pub fn to_move(&self) -> Color {
        self.current_color().map_or(self.turn, Color::opponent)
    }

    /// Follow child `index`. After a player move the first reply, if any, is
    /// played as well. Returns the outcome when a variation end is reached.
    pub fn next(&mut self, index: usize) -> Option<Outcome> {
        if index >= self.current().children.len() {
            return None;
        }
        self.path.push(index);

        if self.current_color() == Some(self.turn) && !self.current().children.is_empty() {
            self.path.push(0);
        }

        self.current().children.is_empty().then(|| self.outcome())
    }

    /// Play at `point` (or pass) for the side to move. Unknown moves become
    /// exploratory nodes.
    pub fn play(&mut self, point: Option<Point>) -> Option<Outcome> {
        let mv = Move {
            color: self.to_move(),
            point,
        };
        let index = match self.current().child_with_move(&mv) {
            Some(i) => i,
            None => self.kifu.node_at_mut(&self.path)?.append_exploratory(mv),
        };
        self.next(index)
    }

    /// Step back one player move. Leaving an exploratory node deletes it;
    /// otherwise the opponent's reply is taken back too.
    pub fn undo(&mut self) {
        let was_exploratory = self.current().is_exploratory();
        if self.path.pop().is_none() {
            return;
        }
        if was_exploratory {
            if let Some(node) = self.kifu.node_at_mut(&self.path) {
                node.children.retain(|c| !c.is_exploratory());
            }
        } else if self.current_color() == Some(self.turn) {
            self.path.pop();
        }
    }

    /// Back to the start, dropping all exploratory nodes.
    pub fn reset(&mut self) {
        self.kifu.root.prune_exploratory();
        self.path.clear();
    }

    /// Best continuation from the current node.
    pub fn hint(&self) -> Hint {
        hint(self.current())
    }

    /// Outcome at the current node.
    pub fn outcome(&self) -> Outcome {
        let node = self.current();
        let message = node
            .node
            .value_string("C")
            .unwrap_or_else(|| feedback(node.rank).to_string());
        Outcome {
            rank: node.rank,
            message,
        }
    }

    /// Letters `A`, `B`, ... for the player's candidate moves from here.
    pub fn variation_markers(&self) -> Vec<VariationMarker> {
        self.current()
            .children
            .iter()
            .zip('A'..='Z')
            .filter_map(|(child, label)| match child.mv() {
                Ok(Some(Move {
                    color,
                    point: Some(point),
                })) if color == self.turn => Some(VariationMarker {
                    label,
                    point,
                    correct: child.rank == Rank::MAX,
                }),
                _ => None,
            })
            .collect()
    }
}
