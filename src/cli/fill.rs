use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use formfill_cli::{load_book, pick_profile, Config};
use page_dom::HtmlDocument;
use tokio::fs;
use tokio::runtime::Handle;
use tool_autofill::{
    AutofillToolBuilder, FillSummary, InMemoryMetrics, TokioIndicatorTimer,
};
use tracing::info;

use super::output::{emit, OutputFormat};

/// Slack after the indicator delay so queued removals have run.
const SETTLE_MARGIN: Duration = Duration::from_millis(50);

#[derive(Args, Clone, Debug)]
pub struct FillArgs {
    /// HTML page to fill
    pub page: PathBuf,

    /// Profile book (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub profile_book: Option<PathBuf>,

    /// Profile key within the book
    #[arg(long)]
    pub profile: Option<String>,

    /// Write the filled page here
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Outline detected controls in the written page
    #[arg(long)]
    pub highlight: bool,

    /// Print fill counters
    #[arg(long)]
    pub stats: bool,
}

pub async fn cmd_fill(args: FillArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let html = fs::read_to_string(&args.page)
        .await
        .with_context(|| format!("reading {}", args.page.display()))?;

    let book_path = args.profile_book.as_ref().or(config.profile_book.as_ref());
    let mut book = load_book(book_path.map(PathBuf::as_path))?;
    let (profile_key, profile) =
        pick_profile(&mut book, args.profile.as_deref().or(config.profile.as_deref()))?;
    info!(profile = %profile_key, page = %args.page.display(), "filling page");

    let doc = Arc::new(HtmlDocument::parse(&html));
    let metrics = Arc::new(InMemoryMetrics::new());
    let policy = config.autofill_policy();
    let tool = AutofillToolBuilder::new(policy.clone())
        .with_dom(doc.clone())
        .with_timer(Arc::new(TokioIndicatorTimer::new(Handle::current())))
        .with_metrics(metrics.clone())
        .build()?;

    let summary = tool.scan_and_fill(&profile);
    if args.highlight {
        let outlined = tool.highlight_detected();
        info!(outlined, "highlighted detected controls");
    }

    if config.autofill.settle_indicators && policy.indicator.enabled && summary.filled > 0 {
        tokio::time::sleep(policy.indicator.clear_after() + SETTLE_MARGIN).await;
    }

    if let Some(output) = &args.output {
        fs::write(output, doc.to_html())
            .await
            .with_context(|| format!("writing {}", output.display()))?;
        info!(path = %output.display(), "wrote filled page");
    }

    match format {
        OutputFormat::Human => {
            println!("{}", status_line(&summary));
            emit(&summary, OutputFormat::Json)?;
        }
        other => emit(&summary, other)?,
    }

    if args.stats {
        let snapshot = metrics.snapshot();
        match format {
            OutputFormat::Human => {
                println!("Counters:");
                for (key, value) in &snapshot {
                    println!("  {key:<32} {value}");
                }
            }
            other => emit(&snapshot, other)?,
        }
    }
    Ok(())
}

pub fn status_line(summary: &FillSummary) -> String {
    match (summary.detected, summary.filled) {
        (0, _) => "No fillable fields found".to_string(),
        (detected, 0) => format!("Detected {detected} field(s) but filled none"),
        (detected, filled) => format!("Filled {filled} of {detected} detected field(s)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_distinguishes_outcomes() {
        let mut summary = FillSummary::default();
        assert_eq!(status_line(&summary), "No fillable fields found");
        summary.detected = 2;
        assert_eq!(status_line(&summary), "Detected 2 field(s) but filled none");
        summary.filled = 1;
        assert_eq!(status_line(&summary), "Filled 1 of 2 detected field(s)");
    }
}
