pub mod config;
pub mod detect;
pub mod fill;
pub mod info;
pub mod output;
pub mod profiles;
pub mod runtime;

pub use config::{cmd_config, ConfigArgs};
pub use detect::{cmd_detect, DetectArgs};
pub use fill::{cmd_fill, FillArgs};
pub use info::cmd_info;
pub use output::OutputFormat;
pub use profiles::{cmd_profiles, ProfilesArgs};
pub use runtime::{init_logging, load_config};
