use anyhow::Result;
use formfill_core_types::FieldType;

use super::runtime::LoadedConfig;

pub async fn cmd_info(loaded: &LoadedConfig) -> Result<()> {
    let config = &loaded.config;
    println!("Formfill System Information");
    println!("  Version:        {}", env!("CARGO_PKG_VERSION"));
    println!("  Build date:     {}", env!("BUILD_DATE"));
    println!("  Git:            {} ({})", env!("GIT_HASH"), env!("GIT_BRANCH"));
    println!(
        "  Config:         {}{}",
        loaded.path.display(),
        if loaded.found { "" } else { " (not found, defaults)" }
    );
    println!("  Field types:    {}", FieldType::ALL.len());
    println!(
        "  Min confidence: {}%",
        config.classifier.min_confidence
    );
    println!(
        "  Autofill:       {}",
        if config.autofill.enabled { "enabled" } else { "disabled" }
    );
    match &config.profile_book {
        Some(path) => println!("  Profile book:   {}", path.display()),
        None => println!("  Profile book:   bundled sample"),
    }
    Ok(())
}
