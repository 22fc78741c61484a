//! Variation evaluation.
//!
//! Leaves are ranked from their annotation flags; every other node takes the
//! best rank among its children. Ranks are stored on the nodes so a player can
//! pick hints and color variation markers later.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SgfError;
use crate::game_tree::Node;
use crate::kifu::{Kifu, KifuNode};

/// Correctness of a variation, worst to best.
/// `Unknown` belongs to exploratory nodes only and is never aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Unknown,
    Wrong,
    /// Not entirely incorrect.
    Doubtful,
    /// Correct, but not the best move.
    Interesting,
    Correct,
}

impl Rank {
    /// Best attainable rank.
    pub const MAX: Rank = Rank::Correct;

    pub fn value(self) -> i8 {
        match self {
            Rank::Unknown => -1,
            Rank::Wrong => 0,
            Rank::Doubtful => 1,
            Rank::Interesting => 2,
            Rank::Correct => 3,
        }
    }

    pub fn coarse(self) -> CoarseRank {
        match self {
            Rank::Unknown => CoarseRank::Unknown,
            Rank::Wrong | Rank::Doubtful | Rank::Interesting => CoarseRank::Wrong,
            Rank::Correct => CoarseRank::Correct,
        }
    }
}

/// Two-level view of [`Rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoarseRank {
    Unknown,
    Wrong,
    Correct,
}

/// Granularity of the stored ranks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankScheme {
    #[default]
    Fine,
    /// Only wrong and correct: doubtful and interesting count as wrong.
    Coarse,
}

impl RankScheme {
    fn restrict(self, rank: Rank) -> Rank {
        match (self, rank.coarse()) {
            (RankScheme::Fine, _) => rank,
            (RankScheme::Coarse, CoarseRank::Correct) => Rank::Correct,
            (RankScheme::Coarse, CoarseRank::Wrong) => Rank::Wrong,
            (RankScheme::Coarse, CoarseRank::Unknown) => Rank::Unknown,
        }
    }
}

/// Leaf flags in precedence order; the first one present decides.
const LEAF_FLAGS: &[(&str, Rank)] = &[
    ("DO", Rank::Doubtful),
    ("IT", Rank::Interesting),
    ("GB", Rank::Correct),
    ("GW", Rank::Correct),
];

/// Rank of a leaf from its flags. Unflagged leaves are wrong.
pub fn classify_leaf(node: &Node) -> Rank {
    LEAF_FLAGS
        .iter()
        .find(|(ident, _)| node.contains(ident))
        .map_or(Rank::Wrong, |&(_, rank)| rank)
}

/// Rank `node` and all source nodes below it, storing each rank on its node.
///
/// Exploratory nodes are skipped: they keep `Rank::Unknown` and don't count
/// towards their parent, so a node whose only children are exploratory is
/// ranked as a leaf.
pub fn evaluate(node: &mut KifuNode, scheme: RankScheme) -> Rank {
    if node.is_exploratory() {
        return node.rank;
    }
    let rank = if node.is_source_leaf() {
        scheme.restrict(classify_leaf(&node.node))
    } else {
        node.children
            .iter_mut()
            .filter(|c| !c.is_exploratory())
            .map(|c| evaluate(c, scheme))
            .max()
            .unwrap_or(Rank::Wrong)
    };
    node.rank = rank;
    rank
}

/// Evaluate every top-level variation of a freshly loaded kifu.
/// Returns the best rank among them.
pub fn evaluate_kifu(kifu: &mut Kifu, scheme: RankScheme) -> Result<Rank, SgfError> {
    let has_moves = kifu
        .root
        .source_children()
        .any(|c| matches!(c.mv(), Ok(Some(_))));
    if !has_moves {
        return Err(SgfError::Structure("kifu root has no move-bearing children"));
    }

    let best = kifu
        .root
        .children
        .iter_mut()
        .filter(|c| !c.is_exploratory())
        .map(|c| evaluate(c, scheme))
        .max()
        .unwrap_or(Rank::Wrong);

    debug!(?best, ?scheme, branches = kifu.root.children.len(), "Evaluated kifu");
    Ok(best)
}

/// Result of a hint request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    /// Index of the child to play.
    Move(usize),
    /// No child reaches the best rank any more.
    NoneRemaining,
}

/// First child (lowest index) holding the best attainable rank.
pub fn hint(node: &KifuNode) -> Hint {
    node.children
        .iter()
        .position(|c| c.rank == Rank::MAX)
        .map_or(Hint::NoneRemaining, Hint::Move)
}
