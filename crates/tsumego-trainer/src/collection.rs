//! Problem collections and the current-problem cursor.
//!
//! Collections are JSON arrays of problems, each carrying its game tree in the
//! SGFGrove array shape. All ordering state lives on `Collection`; randomness
//! comes in from the caller.

use std::fs;
use std::sync::LazyLock;

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sgf_core::GameTree;
use tracing::{debug, info};

use crate::error::TrainerError;

/// Topic of full-board problems (real games, fuseki); colors stay as they are.
pub const GAME_TOPIC: &str = "game";

/// Directory part of a source file inside the book library.
static BOOK_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^books/(.+/)*").expect("book path pattern is valid"));

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(alias = "problem_id")]
    pub id: String,
    pub sgf: GameTree,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Position of the problem within its source tree
    #[serde(default)]
    pub order: u32,
    /// Number of problems taken from the same source tree
    #[serde(default = "one")]
    pub related_positions: u32,
    /// Free-form source information (filename, author, ...)
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl Problem {
    pub fn is_game(&self) -> bool {
        self.topics.iter().any(|t| t == GAME_TOPIC)
    }

    /// Other problems were taken from the same source tree.
    pub fn has_related_positions(&self) -> bool {
        self.related_positions > 1
    }

    /// Metadata as indented JSON with book paths shortened to `book: <file>`.
    /// `None` when there is no metadata or it is an empty object.
    pub fn metadata_text(&self) -> Option<String> {
        let metadata = self.metadata.as_ref()?;
        if metadata.as_object().is_some_and(|m| m.is_empty()) {
            return None;
        }
        serde_json::to_string_pretty(&shorten_book_paths(metadata)).ok()
    }
}

fn shorten_book_paths(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, v)| {
                    let v = match v {
                        Value::String(s) if key == "filename" => {
                            Value::String(BOOK_PATH.replace(s, "book: ").into_owned())
                        }
                        _ => shorten_book_paths(v),
                    };
                    (key.clone(), v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(shorten_book_paths).collect()),
        _ => value.clone(),
    }
}

#[derive(Debug, Clone)]
pub struct Collection {
    problems: Vec<Problem>,
    current: usize,
}

impl Collection {
    pub fn new(problems: Vec<Problem>) -> Result<Self, TrainerError> {
        if problems.is_empty() {
            return Err(TrainerError::EmptyCollection);
        }
        Ok(Self {
            problems,
            current: 0,
        })
    }

    /// Load every JSON file matching `pattern`, in path order.
    pub fn load(pattern: &str) -> Result<Self, TrainerError> {
        let mut paths = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
        paths.sort();

        let mut problems = Vec::new();
        for path in &paths {
            let json = fs::read_to_string(path)?;
            let batch: Vec<Problem> = serde_json::from_str(&json)?;
            debug!(path = %path.display(), count = batch.len(), "Loaded problem file");
            problems.extend(batch);
        }

        info!(
            "Loaded {} problems from {} files matching {}",
            problems.len(),
            paths.len(),
            pattern
        );
        Self::new(problems)
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Problem {
        &self.problems[self.current]
    }

    /// "3 / 10" style position of the current problem.
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.current + 1, self.problems.len())
    }

    /// Advance, wrapping from the last problem to the first.
    pub fn next(&mut self) -> &Problem {
        self.current = (self.current + 1) % self.problems.len();
        self.current()
    }

    /// Step back, wrapping from the first problem to the last.
    pub fn previous(&mut self) -> &Problem {
        self.current = (self.current + self.problems.len() - 1) % self.problems.len();
        self.current()
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.problems.shuffle(rng);
        self.current = 0;
    }

    /// Restore source-tree order (stable for equal positions).
    pub fn order_by_tree(&mut self) {
        self.problems.sort_by_key(|p| p.order);
        self.current = 0;
    }

    /// Make the problem with `id` current.
    pub fn select(&mut self, id: &str) -> Result<&Problem, TrainerError> {
        self.current = self
            .problems
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| TrainerError::ProblemNotFound(id.to_string()))?;
        Ok(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn problem(id: &str, order: u32) -> Problem {
        serde_json::from_value(json!({
            "id": id,
            "sgf": [[{ "AB": ["aa"] }, { "B": "bb" }], []],
            "order": order,
        }))
        .unwrap()
    }

    fn ids(c: &Collection) -> Vec<&str> {
        c.problems().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_collection() {
        assert!(matches!(Collection::new(vec![]), Err(TrainerError::EmptyCollection)));
    }

    #[test]
    fn test_problem_defaults() {
        let p: Problem = serde_json::from_value(json!({
            "problem_id": "7",
            "sgf": [[{}], []],
            "topics": ["game"],
        }))
        .unwrap();
        assert_eq!(p.id, "7");
        assert_eq!(p.related_positions, 1);
        assert!(!p.has_related_positions());
        assert_eq!(p.metadata, None);
        assert_eq!(p.metadata_text(), None);
        assert!(p.is_game());
        assert!(!problem("x", 0).is_game());
    }

    #[test]
    fn test_related_positions() {
        let p: Problem = serde_json::from_value(json!({
            "id": "8",
            "sgf": [[{}], []],
            "related_positions": 4,
        }))
        .unwrap();
        assert!(p.has_related_positions());
    }

    #[test]
    fn test_metadata_text_shortens_book_paths() {
        let mut p = problem("m", 0);
        p.metadata = Some(json!({
            "filename": "books/cho-chikun/elementary/0042.sgf",
            "source": { "filename": "books/gokyo.sgf" },
            "author": "books/not-a-path",
        }));
        let text = p.metadata_text().unwrap();
        let shown: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            shown,
            json!({
                "filename": "book: 0042.sgf",
                "source": { "filename": "book: gokyo.sgf" },
                "author": "books/not-a-path",
            })
        );
        assert!(text.contains("\n  \"author\""));

        p.metadata = Some(json!({}));
        assert_eq!(p.metadata_text(), None);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut c = Collection::new(vec![problem("a", 0), problem("b", 1), problem("c", 2)]).unwrap();
        assert_eq!(c.previous().id, "c");
        assert_eq!(c.position_label(), "3 / 3");
        assert_eq!(c.next().id, "a");
        assert_eq!(c.next().id, "b");
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn test_shuffle_then_order_by_tree() {
        let mut c = Collection::new((0..20).map(|i| problem(&i.to_string(), i)).collect()).unwrap();
        c.next();
        let mut rng = StdRng::seed_from_u64(7);
        c.shuffle(&mut rng);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.len(), 20);

        c.order_by_tree();
        let expected: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        assert_eq!(ids(&c), expected);
    }

    #[test]
    fn test_select() {
        let mut c = Collection::new(vec![problem("a", 0), problem("b", 1)]).unwrap();
        assert_eq!(c.select("b").unwrap().id, "b");
        assert_eq!(c.current_index(), 1);
        assert!(matches!(c.select("zzz"), Err(TrainerError::ProblemNotFound(_))));
    }

    #[test]
    fn test_load_from_glob() {
        let dir = std::env::temp_dir().join(format!("tsumego-collection-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let first = json!([{ "id": "a", "sgf": [[{}], []] }]);
        let second = json!([{ "id": "b", "sgf": [[{}], []] }, { "id": "c", "sgf": [[{}], []] }]);
        fs::write(dir.join("1.json"), first.to_string()).unwrap();
        fs::write(dir.join("2.json"), second.to_string()).unwrap();

        let pattern = format!("{}/*.json", dir.display());
        let c = Collection::load(&pattern).unwrap();
        assert_eq!(ids(&c), vec!["a", "b", "c"]);

        fs::remove_dir_all(&dir).unwrap();
    }
}
