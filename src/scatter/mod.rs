//! Vertex scatter core
//!
//! One run moves a set of target nodes onto the vertices of a source mesh
//! and keys their locations. It runs in four forward-only stages:
//!
//! 1. [`resolve`]: snapshot the source points, source frame and targets
//! 2. [`pairing`]: build the association and timing permutations
//! 3. [`compute`]: derive a position and a frame for each pairing
//! 4. [`commit`]: write each enabled axis through a [`ChannelWriter`]
//!
//! A source without geometry aborts the run before stage 2, and a frame
//! schedule that leaves the timeline aborts it before stage 4. Rejected axis
//! writes in stage 4 are collected in the [`RunReport`] and the run goes on.
//! There is no rollback of writes that already succeeded.
//!
//! ```rust,ignore
//! use scatter::scatter;
//!
//! let report = scatter::run_active(&mut scene, &settings)?;
//! println!("{report}");
//! ```

pub mod commit;
pub mod compute;
pub mod pairing;
pub mod report;
pub mod resolve;

pub use commit::{ChannelWrite, ChannelWriter, CommitSummary, WriteFailure};
pub use compute::ScheduledKey;
pub use pairing::{Pairing, PairingPlan, ShuffleSeeds};
pub use report::{RunOutcome, RunReport};
pub use resolve::Snapshot;

use crate::errors::{Result, ScatterError};
use crate::scene::{NodeKey, Scene};
use crate::settings::ScatterSettings;

/// Runs one scatter from `source` onto `selection` (minus the source).
pub fn run(
    scene: &mut Scene,
    source: NodeKey,
    selection: &[NodeKey],
    settings: &ScatterSettings,
) -> Result<RunReport> {
    let snapshot = resolve::snapshot(scene, source, selection)?;
    let plan = plan_for(&snapshot, settings);
    execute(&snapshot, plan, settings, scene)
}

/// Runs one scatter using the scene's active node, selection and current
/// frame, the way a host action button would.
///
/// `settings.start_frame` is replaced by `scene.current_frame`.
pub fn run_active(scene: &mut Scene, settings: &ScatterSettings) -> Result<RunReport> {
    let source = scene
        .active
        .ok_or_else(|| ScatterError::NodeNotFound("active node".to_owned()))?;
    let selection = scene.selection.clone();
    let settings = ScatterSettings {
        start_frame: scene.current_frame,
        ..settings.clone()
    };
    run(scene, source, &selection, &settings)
}

/// Builds the pairing plan for `snapshot` from the settings' shuffle flags
/// and seed.
#[must_use]
pub fn plan_for(snapshot: &Snapshot, settings: &ScatterSettings) -> PairingPlan {
    let seeds = match settings.seed {
        Some(seed) => ShuffleSeeds::from_seed(seed),
        None => {
            let seeds = ShuffleSeeds::fresh();
            log::debug!(
                "Shuffle seeds: association={} timing={}",
                seeds.association,
                seeds.timing
            );
            seeds
        }
    };
    PairingPlan::generate(
        snapshot.pairing_len(),
        settings.shuffle_association,
        settings.shuffle_timing,
        seeds,
    )
}

/// Runs stages 3 and 4 for an already resolved snapshot and plan.
///
/// `plan` must not be longer than `snapshot.pairing_len()`. A frame schedule
/// that leaves the timeline fails here, before anything is written.
pub fn execute<W: ChannelWriter + ?Sized>(
    snapshot: &Snapshot,
    plan: PairingPlan,
    settings: &ScatterSettings,
    writer: &mut W,
) -> Result<RunReport> {
    debug_assert!(plan.len() <= snapshot.pairing_len());

    if snapshot.targets.is_empty() {
        log::warn!(
            "No targets selected besides source '{}'",
            snapshot.source_name
        );
    }

    let keys = compute::schedule(&plan, snapshot, settings)?;
    let summary = commit::commit(writer, &keys, settings.axes, settings.mode.inserts_keys());

    let report = RunReport::new(
        snapshot.source_name.clone(),
        snapshot.points.len(),
        snapshot.targets.len(),
        plan,
        keys,
        summary,
    );
    log::info!("{report}");
    Ok(report)
}
