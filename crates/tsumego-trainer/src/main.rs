//! Prints the next problem(s) of a collection, reoriented and ranked, as JSON.
//!
//!   tsumego-trainer [--problems N]

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use sgf_core::{Color, Hint, Rank, TransformConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tsumego_trainer::collection::Collection;
use tsumego_trainer::config::{ProblemOrder, TrainerConfig};
use tsumego_trainer::orientation::{self, OrientationPolicy};
use tsumego_trainer::session::{Session, VariationMarker, NO_HINT_MESSAGE};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProblemView {
    id: String,
    position: String,
    transform: TransformConfig,
    game_info: Vec<String>,
    /// Problems taken from the same source tree, when there are others
    #[serde(skip_serializing_if = "Option::is_none")]
    same_tree: Option<u32>,
    turn: Option<&'static str>,
    branch_ranks: Vec<Rank>,
    markers: Vec<VariationMarker>,
    hint: String,
    sgf: sgf_core::GameTree,
}

/// Parse --problems N from CLI args
fn parse_problem_count() -> usize {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--problems" {
            if let Some(n) = args.get(i + 1).and_then(|s| s.trim().parse().ok()) {
                return n;
            }
        }
    }
    1
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = TrainerConfig::from_env()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut collection = Collection::load(&config.collection_pattern)?;

    let policy = match &config.problem_id {
        Some(id) => {
            collection.select(id)?;
            info!(problem = %id, "Permalink, keeping source orientation");
            OrientationPolicy::Fixed
        }
        None => {
            match config.order {
                ProblemOrder::Random => collection.shuffle(&mut rng),
                ProblemOrder::Tree => collection.order_by_tree(),
            }
            OrientationPolicy::Random
        }
    };

    let count = parse_problem_count().clamp(1, collection.len());
    for i in 0..count {
        if i > 0 {
            collection.next();
        }
        let problem = collection.current();
        let prepared = orientation::prepare(problem, &mut rng, policy);
        let same_tree = problem
            .has_related_positions()
            .then_some(problem.related_positions);

        let (turn, branch_ranks, markers, hint) = match Session::new(&prepared.tree, config.rank_scheme) {
            Ok(session) => {
                let ranks = session.kifu().root.children.iter().map(|c| c.rank).collect();
                let hint = match session.hint() {
                    Hint::Move(i) => session
                        .kifu()
                        .root
                        .children
                        .get(i)
                        .and_then(|c| c.mv().ok().flatten())
                        .and_then(|m| m.point)
                        .map_or_else(|| "pass".to_string(), |p| p.to_string()),
                    Hint::NoneRemaining => NO_HINT_MESSAGE.to_string(),
                };
                (
                    Some(session.turn()),
                    ranks,
                    session.variation_markers(),
                    hint,
                )
            }
            Err(e) => {
                warn!(problem = %prepared.id, "Problem can't be played: {e}");
                (None, Vec::new(), Vec::new(), NO_HINT_MESSAGE.to_string())
            }
        };

        let view = ProblemView {
            id: prepared.id,
            position: collection.position_label(),
            transform: prepared.transform,
            game_info: prepared.game_info,
            same_tree,
            turn: turn.map(Color::name),
            branch_ranks,
            markers,
            hint,
            sgf: prepared.tree,
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
    }

    Ok(())
}
