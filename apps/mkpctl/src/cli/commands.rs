//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::MkpConfig;
use crate::helper::Helper;
use crate::source::DatasetSource;
use mkp_core::exit::{EXIT_INTERNAL, EXIT_SUCCESS};
use mkp_core::{
    GraphLoader, GraphStats, KnowledgeGraph, MkpError, Report, ValidationConfig, exit_class,
    map_message_to_code,
};
use std::path::{Path, PathBuf};

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputMode {
    pub json: bool,
    pub quiet: bool,
}

/// Arguments of one `validate` run.
#[derive(Debug, Clone)]
pub struct ValidateArgs {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
    pub limit: Option<usize>,
    pub helper: Option<String>,
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Validate a pack, print its report and return the exit code.
pub fn cmd_validate(args: &ValidateArgs, output: OutputMode) -> i32 {
    let report = run_validate(args).unwrap_or_else(|e| Report::failure(&e));

    if report.is_success() {
        tracing::info!(exit_code = report.exit_code, "validation passed");
    } else {
        tracing::error!(
            exit_code = report.exit_code,
            exit_class = %report.exit_class,
            "{}",
            report.message.as_deref().unwrap_or_default()
        );
    }

    if output.json {
        println!("{}", render_json(&report));
    } else if !(output.quiet && report.is_success()) {
        print!("{}", render_text(&report));
    }

    report.exit_code
}

/// Resolve config, validate the dataset and run the helper.
///
/// A helper failure replaces the success report.
pub fn run_validate(args: &ValidateArgs) -> Result<Report, MkpError> {
    let settings = MkpConfig::resolve(args.config.as_deref(), &args.root)?.with_limit(args.limit);

    let stats = validate_dataset(&args.root, &settings.validation)?;
    let report = Report::success(stats);

    if let Some(helper) = Helper::select(args.helper.as_deref(), settings.helper.as_ref()) {
        let payload = serde_json::to_string(&report)
            .map_err(|e| MkpError::Internal(format!("Cannot serialize report: {}", e)))?;
        helper.run(&payload)?;
    }

    Ok(report)
}

/// Read the pack at `root`, load it and aggregate statistics.
pub fn validate_dataset(root: &Path, config: &ValidationConfig) -> Result<GraphStats, MkpError> {
    let pack = DatasetSource::new(root).read()?;

    let mut graph = KnowledgeGraph::new();
    let summaries = GraphLoader::new(config).load_into(&mut graph, &pack)?;
    for summary in &summaries {
        tracing::info!(
            scope = %summary.name,
            entities = summary.entities,
            relationships = summary.relationships,
            "scope merged"
        );
    }

    Ok(GraphStats::collect(&graph, config.top_limit))
}

// =============================================================================
// CLASSIFY COMMAND
// =============================================================================

/// Print the code and class of a message or exit code.
pub fn cmd_classify(message: Option<&str>, code: Option<i32>, output: OutputMode) -> i32 {
    let code = match (message, code) {
        (Some(message), _) => map_message_to_code(message),
        (None, Some(code)) => code,
        (None, None) => {
            tracing::error!("classify needs --message or --code");
            return EXIT_INTERNAL;
        }
    };
    let class = exit_class(code);

    if output.json {
        let value = serde_json::json!({
            "exit_code": code,
            "exit_class": class,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&value).unwrap_or_default()
        );
    } else {
        println!("{} {}", code, class);
    }

    EXIT_SUCCESS
}

// =============================================================================
// RENDERING
// =============================================================================

/// Pretty JSON form of a report.
pub fn render_json(report: &Report) -> String {
    serde_json::to_string_pretty(report).unwrap_or_default()
}

/// Human-readable form of a report.
pub fn render_text(report: &Report) -> String {
    let Some(stats) = &report.stats else {
        return format!(
            "Validation failed [{} {}]: {}\n",
            report.exit_code,
            report.exit_class,
            report.message.as_deref().unwrap_or_default()
        );
    };

    let mut lines = vec![
        "Knowledge Pack Validation".to_string(),
        "=========================".to_string(),
        "Status:        ok".to_string(),
        format!("Modules:       {}", stats.module_count),
        format!("Entities:      {}", stats.entity_count),
        format!("Relationships: {}", stats.relationship_count),
        format!("Predicates:    {} distinct", stats.distinct_predicates),
        String::new(),
        "Scopes:".to_string(),
    ];
    lines.extend(stats.scopes.iter().map(|scope| {
        format!(
            "  {:<24} {:>6} entities {:>6} relationships",
            scope.name, scope.entities, scope.relationships
        )
    }));

    lines.push(String::new());
    lines.push("Top predicates:".to_string());
    if stats.top_predicates.is_empty() {
        lines.push("  (none)".to_string());
    }
    lines.extend(
        stats
            .top_predicates
            .iter()
            .enumerate()
            .map(|(rank, entry)| format!("  {}. {} ({})", rank + 1, entry.predicate, entry.edge_count)),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

// =============================================================================
// TESTS
// =============================================================================
