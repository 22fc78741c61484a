//! Go problem (tsumego) core.
//!
//! Works on already-parsed SGF game trees. Two algorithms live here:
//! `reorient()` rewrites a whole tree under a mix of mirror, axis-swap and
//! color-swap transforms, and `evaluate()` ranks every variation of a move
//! tree so that a player can give hints and feedback.

pub mod coord;
pub mod error;
pub mod evaluate;
pub mod game_info;
pub mod game_tree;
pub mod kifu;
pub mod reorient;

pub use error::SgfError;
pub use evaluate::{evaluate, evaluate_kifu, hint, CoarseRank, Hint, Rank, RankScheme};
pub use game_tree::{GameTree, Node, PropCategory, PropValue, Scalar};
pub use kifu::{Color, Kifu, KifuNode, Move, NodeOrigin};
pub use reorient::{reorient, reorient_node, TransformConfig};
