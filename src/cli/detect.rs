use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use field_classifier::{Candidate, Detection, ExclusionReason, FieldClassifier, LabelSource};
use formfill_cli::Config;
use page_dom::{DomReader, HtmlDocument};
use serde::Serialize;
use tokio::fs;
use tool_autofill::selector::selector_for;
use tracing::warn;

use super::output::{emit, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct DetectArgs {
    /// HTML page to analyze
    pub page: PathBuf,

    /// Include every scoring field type per control
    #[arg(long)]
    pub candidates: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ControlReport {
    selector: String,
    tag: String,
    label: String,
    label_source: LabelSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    detection: Option<Detection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    excluded: Option<ExclusionReason>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    candidates: Vec<Candidate>,
}

pub async fn cmd_detect(args: DetectArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let html = fs::read_to_string(&args.page)
        .await
        .with_context(|| format!("reading {}", args.page.display()))?;
    let doc = HtmlDocument::parse(&html);
    let classifier = FieldClassifier::with_policy(config.classifier.clone());

    let mut reports = Vec::new();
    for node in doc.form_controls()? {
        let assessed = classifier
            .assess(&doc, node)
            .map_err(anyhow::Error::from)
            .and_then(|assessment| Ok((assessment, selector_for(&doc, node)?)));
        let (assessment, selector) = match assessed {
            Ok(pair) => pair,
            Err(err) => {
                warn!(%node, error = %err, "skipping control");
                continue;
            }
        };
        reports.push(ControlReport {
            selector,
            tag: assessment.context.tag_name,
            label: assessment.context.label_text,
            label_source: assessment.context.label_source,
            detection: assessment.detection,
            excluded: assessment.exclusion,
            candidates: if args.candidates {
                assessment.candidates
            } else {
                Vec::new()
            },
        });
    }

    match format {
        OutputFormat::Human => print_human(&reports),
        other => emit(&reports, other)?,
    }
    Ok(())
}

fn print_human(reports: &[ControlReport]) {
    if reports.is_empty() {
        println!("No form controls found");
        return;
    }
    for report in reports {
        let verdict = match (&report.detection, &report.excluded) {
            (Some(d), _) => format!("{} ({}%, {})", d.field_type, d.confidence, d.method),
            (None, Some(reason)) => format!("excluded: {reason}"),
            (None, None) => "undetected".to_string(),
        };
        println!("{:<32} {:<9} {}", report.selector, report.tag, verdict);
        if !report.label.is_empty() {
            println!("    label: {:?}", report.label);
        }
        for candidate in &report.candidates {
            println!(
                "    - {:<18} score {:>5.1}  {:>3}%  via {}",
                candidate.field_type.as_str(),
                candidate.score,
                candidate.confidence,
                candidate.method
            );
        }
    }
}
