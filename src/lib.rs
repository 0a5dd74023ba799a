pub mod config;
pub mod profiles;

pub use config::{resolve_config_path, AutofillSection, Config, LogFormat};
pub use profiles::{load_book, pick_profile, sample_book};
