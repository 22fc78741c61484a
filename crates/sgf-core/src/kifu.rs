//! Move tree walked by a player.
//!
//! A `GameTree` stores each branch as a node sequence; a kifu stores one
//! `KifuNode` per SGF node with its own child list, so every node can carry a
//! rank and user moves can be hung anywhere.

use serde::{Deserialize, Serialize};

use crate::coord::{Point, BOARD_SIZE, PASS};
use crate::error::SgfError;
use crate::evaluate::Rank;
use crate::game_tree::{GameTree, Node, PropValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Move property identifier for this color.
    pub fn ident(self) -> &'static str {
        match self {
            Color::Black => "B",
            Color::White => "W",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::White => "White",
        }
    }
}

/// A move: who plays, and where (`None` is a pass).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub color: Color,
    pub point: Option<Point>,
}

impl Move {
    pub fn play(color: Color, point: Point) -> Self {
        Self {
            color,
            point: Some(point),
        }
    }

    pub fn pass(color: Color) -> Self {
        Self { color, point: None }
    }
}

/// Where a kifu node came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeOrigin {
    /// Present in the loaded problem.
    #[default]
    Source,
    /// Appended by the user while exploring; never ranked.
    Exploratory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KifuNode {
    pub node: Node,
    pub children: Vec<KifuNode>,
    pub rank: Rank,
    pub origin: NodeOrigin,
}

impl KifuNode {
    pub fn source(node: Node) -> Self {
        Self {
            node,
            children: Vec::new(),
            rank: Rank::Unknown,
            origin: NodeOrigin::Source,
        }
    }

    pub fn is_exploratory(&self) -> bool {
        self.origin == NodeOrigin::Exploratory
    }

    /// The move played in this node, if any.
    pub fn mv(&self) -> Result<Option<Move>, SgfError> {
        for color in [Color::Black, Color::White] {
            let ident = color.ident();
            match self.node.get(ident) {
                Some(PropValue::Move(Some(p))) if p != PASS => {
                    let point =
                        Point::parse(p).map_err(|reason| SgfError::format(ident, p, reason))?;
                    return Ok(Some(Move::play(color, point)));
                }
                Some(PropValue::Move(_)) => return Ok(Some(Move::pass(color))),
                _ => {}
            }
        }
        Ok(None)
    }

    /// Children that came with the problem.
    pub fn source_children(&self) -> impl Iterator<Item = &KifuNode> {
        self.children.iter().filter(|c| !c.is_exploratory())
    }

    pub fn is_source_leaf(&self) -> bool {
        self.source_children().next().is_none()
    }

    /// Index of the child playing `mv`, if there is one.
    pub fn child_with_move(&self, mv: &Move) -> Option<usize> {
        self.children
            .iter()
            .position(|c| matches!(c.mv(), Ok(Some(m)) if m == *mv))
    }

    /// Append a user move as an exploratory child and return its index.
    pub fn append_exploratory(&mut self, mv: Move) -> usize {
        let node = Node::from_move(mv.color.ident(), mv.point.map(|p| p.to_string()));
        self.children.push(KifuNode {
            node,
            children: Vec::new(),
            rank: Rank::Unknown,
            origin: NodeOrigin::Exploratory,
        });
        self.children.len() - 1
    }

    /// Drop every exploratory node below this one.
    pub fn prune_exploratory(&mut self) {
        self.children.retain(|c| !c.is_exploratory());
        for child in &mut self.children {
            child.prune_exploratory();
        }
    }

    fn from_branch(tree: &GameTree) -> Result<Self, SgfError> {
        let mut nodes = tree.nodes.iter().rev();
        let last = nodes
            .next()
            .ok_or(SgfError::Structure("game tree branch has no nodes"))?;

        let mut current = KifuNode::source(last.clone());
        current.children = tree
            .children
            .iter()
            .map(KifuNode::from_branch)
            .collect::<Result<_, _>>()?;

        for node in nodes {
            let mut parent = KifuNode::source(node.clone());
            parent.children.push(current);
            current = parent;
        }
        Ok(current)
    }

    fn to_branch(&self) -> GameTree {
        let mut nodes = vec![self.node.clone()];
        let mut current = self;
        loop {
            let mut sources = current.source_children();
            match (sources.next(), sources.next()) {
                (Some(only), None) => {
                    nodes.push(only.node.clone());
                    current = only;
                }
                _ => break,
            }
        }
        let children = current.source_children().map(KifuNode::to_branch).collect();
        GameTree::new(nodes, children)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Kifu {
    /// The game-info node; the problem's moves are its descendants.
    pub root: KifuNode,
}

impl Kifu {
    pub fn from_game_tree(tree: &GameTree) -> Result<Self, SgfError> {
        Ok(Self {
            root: KifuNode::from_branch(tree)?,
        })
    }

    /// Back to a game tree, leaving exploratory nodes out.
    pub fn to_game_tree(&self) -> GameTree {
        self.root.to_branch()
    }

    /// The color to play: the color of the first move below the root.
    pub fn turn(&self) -> Result<Color, SgfError> {
        let first = self
            .root
            .source_children()
            .next()
            .ok_or(SgfError::Structure("kifu has no moves"))?;
        first
            .mv()?
            .map(|m| m.color)
            .ok_or(SgfError::Structure("first node below the root is not a move"))
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&KifuNode> {
        path.iter()
            .try_fold(&self.root, |node, &i| node.children.get(i))
    }

    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut KifuNode> {
        path.iter()
            .try_fold(&mut self.root, |node, &i| node.children.get_mut(i))
    }

    /// Visible board section from the root's VW property as
    /// (upper left, lower right). The whole board when VW is absent.
    pub fn viewport(&self) -> Result<(Point, Point), SgfError> {
        let full = (Point { x: 0, y: 0 }, Point { x: BOARD_SIZE - 1, y: BOARD_SIZE - 1 });
        let Some(PropValue::PointPairs(pairs)) = self.root.node.get("VW") else {
            return Ok(full);
        };
        let Some((from, to)) = pairs.first() else {
            return Ok(full);
        };
        let parse = |p: &str| Point::parse(p).map_err(|reason| SgfError::format("VW", p, reason));
        let (a, b) = (parse(from)?, parse(to)?);
        // corners may come in any order after mirroring
        Ok((
            Point { x: a.x.min(b.x), y: a.y.min(b.y) },
            Point { x: a.x.max(b.x), y: a.y.max(b.y) },
        ))
    }
}
