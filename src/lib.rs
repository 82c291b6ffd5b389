pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::Settings;
pub use core::format::{failure_line, format_pass, format_passes, format_report_json, render_report};
pub use core::pipeline::{FlyoverPipeline, FlyoverReport};
pub use domain::model::{Coordinates, IpAddress, PassWindow, Stage};
pub use utils::error::{FlyoverError, Result};
