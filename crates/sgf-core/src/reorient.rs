//! Reorientation of a whole game tree: mirrors, axis swap and color swap.
//!
//! Every coordinate-bearing property is rewritten, and corner/side phrases in
//! comments are translated so that the text keeps describing the board.
//! Per node the transforms run in a fixed order: swap axes, mirror
//! horizontally, mirror vertically, swap colors.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coord::{Point, PASS};
use crate::error::SgfError;
use crate::game_tree::{GameTree, Node, PropValue, Scalar};

/// Which transforms to apply. Any subset may be enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformConfig {
    pub mirror_horizontally: bool,
    pub mirror_vertically: bool,
    pub swap_axes: bool,
    pub swap_colors: bool,
}

impl TransformConfig {
    pub const IDENTITY: TransformConfig = TransformConfig {
        mirror_horizontally: false,
        mirror_vertically: false,
        swap_axes: false,
        swap_colors: false,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// True when at least one transform moves points.
    pub fn is_geometric(&self) -> bool {
        self.swap_axes || self.mirror_horizontally || self.mirror_vertically
    }

    /// All 16 combinations, identity first.
    pub fn combinations() -> impl Iterator<Item = TransformConfig> {
        (0u8..16).map(|bits| TransformConfig {
            mirror_horizontally: bits & 1 != 0,
            mirror_vertically: bits & 2 != 0,
            swap_axes: bits & 4 != 0,
            swap_colors: bits & 8 != 0,
        })
    }
}

/// Paired black/white properties exchanged by a color swap.
const COLOR_PAIRS: &[(&str, &str)] = &[
    ("B", "W"),
    ("AB", "AW"),
    ("GB", "GW"),
    ("OB", "OW"),
    ("TB", "TW"),
    ("BT", "WT"),
    ("BL", "WL"),
];

/// Whole-word, simultaneous exchange of phrase pairs.
struct TextMap {
    regex: Regex,
    pairs: &'static [(&'static str, &'static str)],
}

impl TextMap {
    fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
        let alternatives: Vec<String> = pairs
            .iter()
            .flat_map(|(a, b)| [regex::escape(a), regex::escape(b)])
            .collect();
        let regex = Regex::new(&format!(r"\b({})\b", alternatives.join("|")))
            .expect("substitution pattern is valid");
        Self { regex, pairs }
    }

    fn counterpart(&self, word: &str) -> Option<&'static str> {
        self.pairs.iter().find_map(|&(a, b)| {
            if word == a {
                Some(b)
            } else if word == b {
                Some(a)
            } else {
                None
            }
        })
    }

    fn apply(&self, text: &str) -> String {
        self.regex
            .replace_all(text, |caps: &Captures| {
                self.counterpart(&caps[0])
                    .map_or_else(|| caps[0].to_string(), str::to_string)
            })
            .into_owned()
    }
}

static SWAP_AXES_TEXT: LazyLock<TextMap> = LazyLock::new(|| {
    TextMap::new(&[
        ("upper right corner", "lower left corner"),
        ("left side", "upper side"),
        ("right side", "lower side"),
    ])
});

static MIRROR_HORIZONTALLY_TEXT: LazyLock<TextMap> = LazyLock::new(|| {
    TextMap::new(&[
        ("upper left corner", "upper right corner"),
        ("lower left corner", "lower right corner"),
        ("left side", "right side"),
    ])
});

static MIRROR_VERTICALLY_TEXT: LazyLock<TextMap> = LazyLock::new(|| {
    TextMap::new(&[
        ("upper left corner", "lower left corner"),
        ("upper right corner", "lower right corner"),
        ("upper side", "lower side"),
    ])
});

static COLOR_TEXT: LazyLock<TextMap> =
    LazyLock::new(|| TextMap::new(&[("black", "white"), ("Black", "White")]));

static PLAYER_TEXT: LazyLock<TextMap> = LazyLock::new(|| TextMap::new(&[("B", "W")]));

/// Reorient every node of `tree` in place and hand the same tree back.
///
/// Structure and coordinates are checked before anything is rewritten, so on
/// error the tree is left exactly as it was.
pub fn reorient<'a>(
    tree: &'a mut GameTree,
    config: &TransformConfig,
) -> Result<&'a mut GameTree, SgfError> {
    tree.validate_structure()?;
    if config.is_identity() {
        return Ok(tree);
    }
    if config.is_geometric() {
        tree.try_for_each_node(&mut validate_points)?;
    }
    tree.try_for_each_node_mut(&mut |node: &mut Node| apply(node, config))?;

    debug!(?config, nodes = tree.node_count(), "Reoriented game tree");
    Ok(tree)
}

/// Reorient a single node. Like [`reorient`], nothing changes on error.
pub fn reorient_node(node: &mut Node, config: &TransformConfig) -> Result<(), SgfError> {
    if config.is_geometric() {
        validate_points(node)?;
    }
    apply(node, config)
}

fn apply(node: &mut Node, config: &TransformConfig) -> Result<(), SgfError> {
    if config.swap_axes {
        map_points(node, Point::swap_axes)?;
        translate_comment(node, &SWAP_AXES_TEXT);
    }
    if config.mirror_horizontally {
        map_points(node, Point::mirror_horizontally)?;
        translate_comment(node, &MIRROR_HORIZONTALLY_TEXT);
    }
    if config.mirror_vertically {
        map_points(node, Point::mirror_vertically)?;
        translate_comment(node, &MIRROR_VERTICALLY_TEXT);
    }
    if config.swap_colors {
        swap_colors(node);
    }
    Ok(())
}

fn swap_colors(node: &mut Node) {
    for (black, white) in COLOR_PAIRS {
        node.swap_properties(black, white);
    }
    if let Some(PropValue::Scalar(Scalar::Text(player))) = node.get_mut("PL") {
        *player = PLAYER_TEXT.apply(player);
    }
    translate_comment(node, &COLOR_TEXT);
}

fn translate_comment(node: &mut Node, map: &TextMap) {
    if let Some(PropValue::Text(comment)) = node.get_mut("C") {
        *comment = map.apply(comment);
    }
}

fn is_pass(p: &str) -> bool {
    p == PASS
}

fn map_point(ident: &str, p: &str, f: fn(Point) -> Point) -> Result<String, SgfError> {
    let point = Point::parse(p).map_err(|reason| SgfError::format(ident, p, reason))?;
    Ok(f(point).to_string())
}

fn map_points(node: &mut Node, f: fn(Point) -> Point) -> Result<(), SgfError> {
    for (ident, value) in node.iter_mut() {
        match value {
            PropValue::Move(Some(p)) if !is_pass(p.as_str()) => *p = map_point(ident, p, f)?,
            PropValue::PointList(points) => {
                for p in points.iter_mut() {
                    *p = map_point(ident, p, f)?;
                }
            }
            PropValue::LabeledPoints(labels) => {
                for (p, _) in labels.iter_mut() {
                    *p = map_point(ident, p, f)?;
                }
            }
            PropValue::PointPairs(pairs) => {
                for (from, to) in pairs.iter_mut() {
                    *from = map_point(ident, from, f)?;
                    *to = map_point(ident, to, f)?;
                }
            }
            PropValue::Move(_) | PropValue::Text(_) | PropValue::Scalar(_) => {}
        }
    }
    Ok(())
}

fn validate_points(node: &Node) -> Result<(), SgfError> {
    let check = |ident: &str, p: &str| {
        Point::parse(p)
            .map(|_| ())
            .map_err(|reason| SgfError::format(ident, p, reason))
    };
    for (ident, value) in node.iter() {
        match value {
            PropValue::Move(Some(p)) if !is_pass(p.as_str()) => check(ident, p)?,
            PropValue::PointList(points) => {
                points.iter().try_for_each(|p| check(ident, p))?;
            }
            PropValue::LabeledPoints(labels) => {
                labels.iter().try_for_each(|(p, _)| check(ident, p))?;
            }
            PropValue::PointPairs(pairs) => {
                pairs
                    .iter()
                    .try_for_each(|(from, to)| check(ident, from).and_then(|()| check(ident, to)))?;
            }
            PropValue::Move(_) | PropValue::Text(_) | PropValue::Scalar(_) => {}
        }
    }
    Ok(())
}
