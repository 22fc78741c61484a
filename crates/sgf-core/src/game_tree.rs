//! Parsed SGF game tree model.
//!
//! A game tree is a node sequence followed by sub-variations. Each node maps
//! property identifiers to values whose shape is fixed by the identifier
//! (see [`PropCategory::of`]), so transforms can match on the value instead of
//! guessing from the identifier.
//!
//! Trees (de)serialize to the JSON shape produced by SGFGrove:
//! `[[{node}, {node}, ...], [[subtree], [subtree], ...]]`.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SgfError;

/// Value shape of an SGF property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropCategory {
    /// B, W: one point, or none for a pass.
    Move,
    PointList,
    /// LB: (point, label text) pairs.
    LabeledPoints,
    /// AR, LN, VW: (point, point) pairs.
    PointPairs,
    Text,
    Scalar,
}

impl PropCategory {
    /// Category of a property identifier. Every identifier maps to exactly one.
    pub fn of(ident: &str) -> Self {
        match ident {
            "B" | "W" => PropCategory::Move,
            "AB" | "AE" | "AW" | "CR" | "DD" | "MA" | "SL" | "SQ" | "TB" | "TR" | "TW" => {
                PropCategory::PointList
            }
            "LB" => PropCategory::LabeledPoints,
            "AR" | "LN" | "VW" => PropCategory::PointPairs,
            "C" | "GC" => PropCategory::Text,
            _ => PropCategory::Scalar,
        }
    }
}

/// Simple property value (game info, annotations, flags).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
    /// Composed value such as `AP[CGoban:3]`, written as an array.
    Compose(Vec<Scalar>),
    Empty,
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Compose(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(":")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
            Scalar::Empty => Ok(()),
        }
    }
}

/// A property value. Points are kept as the two-letter strings of the source
/// and validated when a transform touches them.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Move(Option<String>),
    PointList(Vec<String>),
    LabeledPoints(Vec<(String, String)>),
    PointPairs(Vec<(String, String)>),
    Text(String),
    Scalar(Scalar),
}

impl PropValue {
    pub fn category(&self) -> PropCategory {
        match self {
            PropValue::Move(_) => PropCategory::Move,
            PropValue::PointList(_) => PropCategory::PointList,
            PropValue::LabeledPoints(_) => PropCategory::LabeledPoints,
            PropValue::PointPairs(_) => PropCategory::PointPairs,
            PropValue::Text(_) => PropCategory::Text,
            PropValue::Scalar(_) => PropCategory::Scalar,
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        PropValue::Text(s.into())
    }

    pub fn point(p: impl Into<String>) -> Self {
        PropValue::Move(Some(p.into()))
    }

    pub fn points<I, S>(points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PropValue::PointList(points.into_iter().map(Into::into).collect())
    }
}

impl Serialize for PropValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropValue::Move(v) => v.serialize(serializer),
            PropValue::PointList(v) => v.serialize(serializer),
            PropValue::LabeledPoints(v) | PropValue::PointPairs(v) => v.serialize(serializer),
            PropValue::Text(v) => v.serialize(serializer),
            PropValue::Scalar(v) => v.serialize(serializer),
        }
    }
}

/// One SGF node: property identifier -> value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    props: BTreeMap<String, PropValue>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, ident: &str) -> Option<&PropValue> {
        self.props.get(ident)
    }

    pub fn get_mut(&mut self, ident: &str) -> Option<&mut PropValue> {
        self.props.get_mut(ident)
    }

    pub fn contains(&self, ident: &str) -> bool {
        self.props.contains_key(ident)
    }

    /// Set a property, rejecting values whose shape doesn't fit the identifier.
    pub fn set(&mut self, ident: &str, value: PropValue) -> Result<Option<PropValue>, SgfError> {
        if value.category() != PropCategory::of(ident) {
            return Err(SgfError::format(
                ident,
                &format!("{value:?}"),
                "value shape does not match property",
            ));
        }
        Ok(self.props.insert(ident.to_string(), value))
    }

    /// Node holding only the move `color_ident` (B or W) at `point`.
    pub(crate) fn from_move(color_ident: &str, point: Option<String>) -> Self {
        let mut props = BTreeMap::new();
        props.insert(color_ident.to_string(), PropValue::Move(point));
        Self { props }
    }

    /// Builder form of [`Node::set`].
    pub fn with(mut self, ident: &str, value: PropValue) -> Result<Self, SgfError> {
        self.set(ident, value)?;
        Ok(self)
    }

    pub fn remove(&mut self, ident: &str) -> Option<PropValue> {
        self.props.remove(ident)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Values can be rewritten in place but not re-typed, since the
    /// category of each identifier is fixed.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut PropValue)> {
        self.props.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Display form of a text or scalar property.
    pub fn value_string(&self, ident: &str) -> Option<String> {
        match self.props.get(ident)? {
            PropValue::Text(s) => Some(s.clone()),
            PropValue::Scalar(s) => Some(s.to_string()),
            _ => None,
        }
    }

    /// Exchange two properties. A side that is absent stays absent on the
    /// other key; nothing is inserted when both are absent.
    pub fn swap_properties(&mut self, a: &str, b: &str) {
        let value_a = self.props.remove(a);
        let value_b = self.props.remove(b);
        if let Some(v) = value_a {
            self.props.insert(b.to_string(), v);
        }
        if let Some(v) = value_b {
            self.props.insert(a.to_string(), v);
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.props.len()))?;
        for (ident, value) in &self.props {
            map.serialize_entry(ident, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an SGF node object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut props = BTreeMap::new();
        while let Some(ident) = map.next_key::<String>()? {
            let value = match PropCategory::of(&ident) {
                PropCategory::Move => PropValue::Move(map.next_value()?),
                PropCategory::PointList => PropValue::PointList(map.next_value()?),
                PropCategory::LabeledPoints => PropValue::LabeledPoints(map.next_value()?),
                PropCategory::PointPairs => PropValue::PointPairs(map.next_value()?),
                PropCategory::Text => PropValue::Text(map.next_value()?),
                PropCategory::Scalar => PropValue::Scalar(map.next_value()?),
            };
            if props.insert(ident.clone(), value).is_some() {
                return Err(de::Error::custom(format!("duplicate property {ident}")));
            }
        }
        Ok(Node { props })
    }
}

/// A branch: its linear node sequence and the variations that follow it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameTree {
    pub nodes: Vec<Node>,
    pub children: Vec<GameTree>,
}

impl GameTree {
    pub fn new(nodes: Vec<Node>, children: Vec<GameTree>) -> Self {
        Self { nodes, children }
    }

    /// The first node, which carries the game-info properties.
    pub fn root(&self) -> Result<&Node, SgfError> {
        self.nodes.first().ok_or(SgfError::Structure("game tree has no nodes"))
    }

    /// Check that every branch holds at least one node.
    pub fn validate_structure(&self) -> Result<(), SgfError> {
        if self.nodes.is_empty() {
            return Err(SgfError::Structure("game tree branch has no nodes"));
        }
        self.children.iter().try_for_each(GameTree::validate_structure)
    }

    /// Depth-first, pre-order visit of every node.
    pub fn try_for_each_node<E, F>(&self, f: &mut F) -> Result<(), E>
    where
        F: FnMut(&Node) -> Result<(), E>,
    {
        self.nodes.iter().try_for_each(&mut *f)?;
        for child in &self.children {
            child.try_for_each_node(f)?;
        }
        Ok(())
    }

    /// Mutable variant of [`GameTree::try_for_each_node`].
    pub fn try_for_each_node_mut<E, F>(&mut self, f: &mut F) -> Result<(), E>
    where
        F: FnMut(&mut Node) -> Result<(), E>,
    {
        self.nodes.iter_mut().try_for_each(&mut *f)?;
        for child in &mut self.children {
            child.try_for_each_node_mut(f)?;
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len() + self.children.iter().map(GameTree::node_count).sum::<usize>()
    }
}

impl Serialize for GameTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.nodes, &self.children).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (nodes, children) = <(Vec<Node>, Vec<GameTree>)>::deserialize(deserializer)?;
        Ok(GameTree { nodes, children })
    }
}
