#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod assets;
pub mod errors;
pub mod scatter;
pub mod scene;
pub mod settings;

pub use animation::{Axis, AxisMask, InterpolationMode, KeyframeTrack, LocationTracks};
pub use assets::{SceneDocument, load_scene, save_scene};
pub use errors::{Result, ScatterError};
pub use scatter::{PairingPlan, RunOutcome, RunReport, run, run_active};
pub use scene::{Node, NodeKey, PointCloud, Scene, SceneStatus, Transform};
pub use settings::{KeyMode, ScatterSettings, SettingsOverrides};
