//! The hailstone command-line interface.
//!
//! This module is the entry point for all CLI commands and orchestrates
//! the core library functions. Input errors reach the user as one
//! normalized "invalid expression" line plus a full miette diagnostic on
//! stderr; the detailed kind is for logs, not for the user.

use std::error::Error;
use std::{fs, process};

use clap::Parser;

use crate::challenge::Challenge;
use crate::cli::args::{Command, HailstoneArgs};
use crate::cli::output::{OutputSink, StdoutSink};
use crate::diagnostics::HailstoneError;
use crate::engine::{Explorer, Limits};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = HailstoneArgs::parse();

    let limits = match resolve_limits(&args) {
        Ok(limits) => limits,
        Err(e) => {
            eprintln!("Error: invalid configuration: {e}");
            process::exit(2);
        }
    };
    let explorer = Explorer::new(limits);
    let mut sink = StdoutSink;

    let result = match args.command {
        Command::Eval { expr } => handle_eval(&explorer, &expr, &mut sink),
        Command::Seq {
            expr,
            limit,
            log,
            json,
        } => handle_seq(&explorer, &expr, limit, log, json, &mut sink),
        Command::Export { expr, output } => handle_export(&explorer, &expr, &output),
        Command::Summary { expr } => handle_summary(&explorer, &expr, &mut sink),
        Command::Challenge { seed, answer } => handle_challenge(seed, answer, &mut sink),
    };

    if let Err(err) = result {
        report_error(err);
        process::exit(1);
    }
}

/// Limits come from the optional config file first, then individual flag
/// overrides.
fn resolve_limits(args: &HailstoneArgs) -> Result<Limits, Box<dyn Error>> {
    let mut limits = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            serde_json::from_str(&text)?
        }
        None => Limits::default(),
    };
    if let Some(budget) = args.digit_budget {
        limits.digit_budget = budget;
    }
    if let Some(ceiling) = args.step_ceiling {
        limits.step_ceiling = ceiling;
    }
    Ok(limits)
}

fn report_error(err: Box<dyn Error>) {
    match err.downcast::<HailstoneError>() {
        Ok(e) => {
            eprintln!("Error: {}", e.user_message());
            crate::diagnostics::print_error(*e);
        }
        Err(other) => eprintln!("Error: {other}"),
    }
}

// ============================================================================
// SUBCOMMAND HANDLERS
// ============================================================================

fn handle_eval(
    explorer: &Explorer,
    expr: &str,
    sink: &mut dyn OutputSink,
) -> Result<(), Box<dyn Error>> {
    let n = explorer.evaluate(expr)?;
    sink.emit(&n.to_string());
    Ok(())
}

fn handle_seq(
    explorer: &Explorer,
    expr: &str,
    limit: Option<usize>,
    log: bool,
    json: bool,
    sink: &mut dyn OutputSink,
) -> Result<(), Box<dyn Error>> {
    let n = explorer.evaluate(expr)?;

    if log || json {
        let points = explorer.log_points(&n)?;
        if json {
            sink.emit(&serde_json::to_string(&points)?);
        } else {
            for point in &points {
                sink.emit(&format!("{}\t{:.6}", point.step, point.ln));
            }
        }
        return Ok(());
    }

    let display_limit = limit.unwrap_or(explorer.limits().display_limit);
    let lines = crate::render::listing(&n, display_limit);
    let truncated = lines.len() > display_limit;
    for line in &lines {
        sink.emit(line);
    }
    if truncated {
        output::print_warning(&format!(
            "sequence truncated to the first {display_limit} values"
        ));
    }
    Ok(())
}

fn handle_export(
    explorer: &Explorer,
    expr: &str,
    output_path: &std::path::Path,
) -> Result<(), Box<dyn Error>> {
    let n = explorer.evaluate(expr)?;
    let mut file = fs::File::create(output_path)?;
    let rows = explorer.export_csv(&n, &mut file)?;
    output::print_status(&format!(
        "wrote {rows} rows to {}",
        output_path.display()
    ));
    Ok(())
}

fn handle_summary(
    explorer: &Explorer,
    expr: &str,
    sink: &mut dyn OutputSink,
) -> Result<(), Box<dyn Error>> {
    let n = explorer.evaluate(expr)?;
    let summary = explorer.summary(&n)?;
    sink.emit(&format!("start: {n}"));
    sink.emit(&format!("steps: {}", summary.steps));
    sink.emit(&format!("peak: {}", summary.peak));
    Ok(())
}

fn handle_challenge(
    seed: Option<u64>,
    answer: Option<u32>,
    sink: &mut dyn OutputSink,
) -> Result<(), Box<dyn Error>> {
    let challenge = match seed {
        Some(seed) => Challenge::from_seed(seed),
        None => Challenge::random(),
    };

    match answer {
        None => {
            sink.emit(&challenge.question());
            Ok(())
        }
        Some(answer) if challenge.check(answer) => {
            output::print_status("correct");
            Ok(())
        }
        Some(_) => Err("incorrect answer".into()),
    }
}
