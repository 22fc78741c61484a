//! Choosing and applying a random orientation for a problem.

use rand::Rng;
use serde::Serialize;
use sgf_core::{game_info, reorient, GameTree, TransformConfig};
use tracing::warn;

use crate::collection::Problem;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrientationPolicy {
    /// Random mirrors, axis swap and (except for games) color swap.
    #[default]
    Random,
    /// Keep the source orientation, e.g. for permalinks where coordinates
    /// are discussed.
    Fixed,
}

/// A problem ready to be handed to a board widget.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedProblem {
    pub id: String,
    pub tree: GameTree,
    pub transform: TransformConfig,
    pub game_info: Vec<String>,
}

/// Each transform is enabled with probability 1/2.
pub fn random_transform<R: Rng + ?Sized>(rng: &mut R, allow_color_swap: bool) -> TransformConfig {
    TransformConfig {
        mirror_horizontally: rng.random_bool(0.5),
        mirror_vertically: rng.random_bool(0.5),
        swap_axes: rng.random_bool(0.5),
        swap_colors: allow_color_swap && rng.random_bool(0.5),
    }
}

/// Reorient a copy of the problem's tree and summarize its game info.
///
/// If the tree can't be reoriented the source orientation is kept and the
/// failure is logged; the problem is still shown.
pub fn prepare<R: Rng + ?Sized>(
    problem: &Problem,
    rng: &mut R,
    policy: OrientationPolicy,
) -> PreparedProblem {
    let chosen = match policy {
        OrientationPolicy::Fixed => TransformConfig::IDENTITY,
        OrientationPolicy::Random => random_transform(rng, !problem.is_game()),
    };

    let mut tree = problem.sgf.clone();
    let transform = match reorient(&mut tree, &chosen) {
        Ok(_) => chosen,
        Err(e) => {
            warn!(problem = %problem.id, "Keeping source orientation: {e}");
            TransformConfig::IDENTITY
        }
    };

    let metadata = problem.metadata_text();
    let game_info = tree
        .root()
        .map(|root| game_info::summarize(root, metadata.as_deref()))
        .unwrap_or_default();

    PreparedProblem {
        id: problem.id.clone(),
        tree,
        transform,
        game_info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn problem(topics: &[&str], sgf: serde_json::Value) -> Problem {
        serde_json::from_value(json!({ "id": "p1", "sgf": sgf, "topics": topics })).unwrap()
    }

    #[test]
    fn test_games_never_swap_colors() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            assert!(!random_transform(&mut rng, false).swap_colors);
        }
    }

    #[test]
    fn test_random_transform_covers_all_flags() {
        let mut rng = StdRng::seed_from_u64(2);
        let seen: Vec<TransformConfig> = (0..200).map(|_| random_transform(&mut rng, true)).collect();
        assert!(seen.iter().any(|c| c.swap_colors));
        assert!(seen.iter().any(|c| c.swap_axes));
        assert!(seen.iter().any(|c| c.mirror_horizontally));
        assert!(seen.iter().any(|c| c.mirror_vertically));
        assert!(seen.iter().any(|c| c.is_identity()));
    }

    #[test]
    fn test_fixed_policy_keeps_tree() {
        let p = problem(&[], json!([[{ "PW": "Shusaku", "AB": ["cd"] }], []]));
        let mut rng = StdRng::seed_from_u64(3);
        let prepared = prepare(&p, &mut rng, OrientationPolicy::Fixed);
        assert!(prepared.transform.is_identity());
        assert_eq!(prepared.tree, p.sgf);
        assert_eq!(prepared.game_info, vec!["White: Shusaku"]);
    }

    #[test]
    fn test_game_info_includes_metadata() {
        let mut p = problem(&[], json!([[{ "PB": "Genan", "GC": "Famous game", "AB": ["cd"] }], []]));
        p.metadata = Some(json!({ "filename": "books/classics/ear-reddening.sgf" }));
        let mut rng = StdRng::seed_from_u64(5);
        let prepared = prepare(&p, &mut rng, OrientationPolicy::Fixed);
        assert_eq!(
            prepared.game_info,
            vec![
                "Black: Genan".to_string(),
                "{\n  \"filename\": \"book: ear-reddening.sgf\"\n}".to_string(),
                String::new(),
                "Famous game".to_string(),
            ]
        );
    }

    #[test]
    fn test_malformed_tree_falls_back() {
        let p = problem(&[], json!([[{ "AB": ["cd", "zzz"] }], []]));
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..20 {
            let prepared = prepare(&p, &mut rng, OrientationPolicy::Random);
            if prepared.transform.is_identity() {
                assert_eq!(prepared.tree, p.sgf);
            } else {
                // only a color swap gets through without touching points
                assert!(!prepared.transform.is_geometric());
                assert!(prepared.tree.nodes[0].contains("AW"));
            }
        }
    }
}
