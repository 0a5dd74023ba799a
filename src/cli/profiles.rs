use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use formfill_cli::{load_book, Config};
use serde::Serialize;

use super::output::{emit, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct ProfilesArgs {
    /// Profile book (JSON or YAML); the bundled sample when omitted
    #[arg(long, value_name = "FILE")]
    pub profile_book: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileListing<'a> {
    key: &'a str,
    name: &'a str,
    current: bool,
    full_name: &'a str,
    current_title: &'a str,
}

pub async fn cmd_profiles(args: ProfilesArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let path = args.profile_book.as_ref().or(config.profile_book.as_ref());
    let book = load_book(path.map(PathBuf::as_path))?;
    let active = book.active().map(|(key, _)| key.to_string());

    let listing: Vec<ProfileListing<'_>> = book
        .profiles
        .iter()
        .map(|(key, named)| ProfileListing {
            key,
            name: &named.name,
            current: active.as_deref() == Some(key.as_str()),
            full_name: &named.profile.personal_info.full_name,
            current_title: &named.profile.professional.current_title,
        })
        .collect();

    match format {
        OutputFormat::Human => {
            if listing.is_empty() {
                println!("No profiles in book");
            }
            for entry in &listing {
                let marker = if entry.current { "*" } else { " " };
                println!(
                    "{marker} {:<24} {:<24} {}",
                    entry.key, entry.name, entry.current_title
                );
            }
        }
        other => emit(&listing, other)?,
    }
    Ok(())
}
