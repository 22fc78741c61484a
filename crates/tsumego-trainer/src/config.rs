//! Trainer configuration from environment variables

use std::env;

use sgf_core::RankScheme;

use crate::error::TrainerError;

/// How the collection is ordered before the first problem is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProblemOrder {
    #[default]
    Random,
    /// Order in which the problems appear in their source tree.
    Tree,
}

#[derive(Clone, Debug)]
pub struct TrainerConfig {
    /// Glob pattern of collection JSON files
    pub collection_pattern: String,

    pub order: ProblemOrder,

    /// Show one problem as a permalink: no shuffling, no reorientation
    pub problem_id: Option<String>,

    pub rank_scheme: RankScheme,

    /// Fixed RNG seed for reproducible orientation and order
    pub seed: Option<u64>,
}

impl TrainerConfig {
    pub fn from_env() -> Result<Self, TrainerError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the config from any variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, TrainerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let collection_pattern =
            var("TSUMEGO_COLLECTION").unwrap_or_else(|| "data/*.json".to_string());

        let order = match var("TSUMEGO_ORDER").as_deref() {
            None | Some("random") => ProblemOrder::Random,
            Some("tree") => ProblemOrder::Tree,
            Some(other) => {
                return Err(TrainerError::Config(format!(
                    "TSUMEGO_ORDER must be 'random' or 'tree', got '{other}'"
                )))
            }
        };

        let problem_id = var("TSUMEGO_PROBLEM_ID").filter(|id| !id.is_empty());

        let rank_scheme = match var("TSUMEGO_RANK_SCHEME").as_deref() {
            None | Some("fine") => RankScheme::Fine,
            Some("coarse") => RankScheme::Coarse,
            Some(other) => {
                return Err(TrainerError::Config(format!(
                    "TSUMEGO_RANK_SCHEME must be 'fine' or 'coarse', got '{other}'"
                )))
            }
        };

        let seed = var("TSUMEGO_SEED")
            .map(|v| {
                v.parse::<u64>()
                    .map_err(|_| TrainerError::Config(format!("TSUMEGO_SEED is not a number: {v}")))
            })
            .transpose()?;

        Ok(Self {
            collection_pattern,
            order,
            problem_id,
            rank_scheme,
            seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<TrainerConfig, TrainerError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TrainerConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = config(&[]).unwrap();
        assert_eq!(c.collection_pattern, "data/*.json");
        assert_eq!(c.order, ProblemOrder::Random);
        assert_eq!(c.problem_id, None);
        assert_eq!(c.rank_scheme, RankScheme::Fine);
        assert_eq!(c.seed, None);
    }

    #[test]
    fn test_explicit_values() {
        let c = config(&[
            ("TSUMEGO_COLLECTION", "problems/*.json"),
            ("TSUMEGO_ORDER", "tree"),
            ("TSUMEGO_PROBLEM_ID", "1234"),
            ("TSUMEGO_RANK_SCHEME", "coarse"),
            ("TSUMEGO_SEED", "42"),
        ])
        .unwrap();
        assert_eq!(c.collection_pattern, "problems/*.json");
        assert_eq!(c.order, ProblemOrder::Tree);
        assert_eq!(c.problem_id.as_deref(), Some("1234"));
        assert_eq!(c.rank_scheme, RankScheme::Coarse);
        assert_eq!(c.seed, Some(42));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(config(&[("TSUMEGO_ORDER", "alpha")]), Err(TrainerError::Config(_))));
        assert!(matches!(
            config(&[("TSUMEGO_RANK_SCHEME", "medium")]),
            Err(TrainerError::Config(_))
        ));
        assert!(matches!(config(&[("TSUMEGO_SEED", "x")]), Err(TrainerError::Config(_))));
    }
}
