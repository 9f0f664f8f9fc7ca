use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};

use scatter::animation::{Axis, AxisMask};
use scatter::scene::{Scene, SceneStatus};
use scatter::{KeyMode, RunReport, ScatterSettings, SettingsOverrides};

/// Scatter objects onto the vertices of a source mesh and key their locations.
#[derive(Parser, Debug)]
#[command(name = "scatter", version, about)]
struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one scatter over a scene document
    Run(RunArgs),
    /// Show whether a scene document is ready to scatter
    Inspect {
        /// Scene document (JSON)
        scene: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Scene document (JSON)
    scene: PathBuf,

    /// Settings file (JSON); flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Key the X location channel
    #[arg(long)]
    axis_x: bool,
    /// Key the Y location channel
    #[arg(long)]
    axis_y: bool,
    /// Key the Z location channel
    #[arg(long)]
    axis_z: bool,

    /// Use world-space vertex positions
    #[arg(long, conflicts_with = "local_space")]
    world_space: bool,
    /// Use vertex positions relative to the source mesh
    #[arg(long)]
    local_space: bool,

    /// Randomize which target receives which vertex
    #[arg(long)]
    shuffle_association: bool,
    /// Randomize the order in which targets are keyed
    #[arg(long)]
    shuffle_timing: bool,

    /// Frames between consecutive keys
    #[arg(long, allow_negative_numbers = true)]
    frame_step: Option<i32>,
    /// Frame of the first key (defaults to the scene's current frame, which
    /// is left unchanged)
    #[arg(long, allow_negative_numbers = true)]
    start_frame: Option<i32>,

    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Seed for both shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// Source node name (defaults to the scene's active node)
    #[arg(long)]
    source: Option<String>,

    /// Where to write the updated scene (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Position,
    Keyframe,
    Offset,
}

impl From<ModeArg> for KeyMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Position => KeyMode::Position,
            ModeArg::Keyframe => KeyMode::Keyframe,
            ModeArg::Offset => KeyMode::Offset,
        }
    }
}

impl RunArgs {
    fn overrides(&self) -> SettingsOverrides {
        let axes: AxisMask = [
            (self.axis_x, Axis::X),
            (self.axis_y, Axis::Y),
            (self.axis_z, Axis::Z),
        ]
        .into_iter()
        .filter_map(|(on, axis)| on.then_some(axis))
        .collect();

        let world_space = if self.world_space {
            Some(true)
        } else if self.local_space {
            Some(false)
        } else {
            None
        };

        SettingsOverrides {
            axes,
            world_space,
            shuffle_association: self.shuffle_association,
            shuffle_timing: self.shuffle_timing,
            frame_step: self.frame_step,
            start_frame: self.start_frame,
            mode: self.mode.map(KeyMode::from),
            seed: self.seed,
        }
    }

    /// Settings for a run over `scene`: the config file (or defaults), with
    /// the start frame taken from the scene's playhead, then the flags.
    fn settings(&self, scene: &Scene) -> anyhow::Result<ScatterSettings> {
        let mut settings = match &self.config {
            Some(path) => ScatterSettings::load(path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?,
            None => ScatterSettings::default(),
        };
        settings.start_frame = scene.current_frame;
        settings.apply_overrides(&self.overrides());
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Run(args) => run(&args),
        Command::Inspect { scene } => inspect(&scene),
    }
}

/// Runs one scatter over `scene` without touching its active node or
/// current frame, so the saved document keeps them.
fn scatter_scene(args: &RunArgs, scene: &mut Scene) -> anyhow::Result<RunReport> {
    let settings = args.settings(scene)?;
    let source = match &args.source {
        Some(name) => scene.require(name)?,
        None => scene
            .active
            .context("No active node; pass --source or set \"active\" in the scene")?,
    };
    let selection = scene.selection.clone();
    Ok(scatter::run(scene, source, &selection, &settings)?)
}

fn run(args: &RunArgs) -> anyhow::Result<()> {
    let mut scene = scatter::load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    let report = scatter_scene(args, &mut scene)?;

    for failure in &report.failures {
        eprintln!("rejected: {}", failure.error);
    }
    if !report.is_clean() {
        eprintln!(
            "{} of {} axis writes rejected",
            report.failures.len(),
            report.failures.len() + report.writes
        );
    }

    match &args.output {
        Some(path) => scatter::save_scene(path, &scene)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let stdout = std::io::stdout();
            scatter::assets::write_scene(stdout.lock(), &scene)?;
            println!();
        }
    }
    Ok(())
}

fn inspect(path: &Path) -> anyhow::Result<()> {
    let scene = scatter::load_scene(path)
        .with_context(|| format!("Failed to load scene {}", path.display()))?;

    let source = scene.active.map_or("<none>", |key| scene.name_of(key));
    match scene.status() {
        SceneStatus::SourceMissing => println!("No active node; set \"active\" to a mesh node"),
        SceneStatus::SourceNotMesh => println!("Active node \"{source}\" must be a mesh"),
        SceneStatus::NeedsTargets { vertex_count } => println!(
            "{vertex_count} vertices in source \"{source}\"\nSelect both source mesh and target objects"
        ),
        SceneStatus::Ready {
            vertex_count,
            target_count,
        } => println!(
            "{vertex_count} vertices in source \"{source}\"\n{target_count} selected target items"
        ),
    }
    Ok(())
}
