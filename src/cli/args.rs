//! Defines the command-line arguments and subcommands for the hailstone CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "hailstone",
    version,
    about = "Evaluate a guarded arithmetic expression and explore its Collatz trajectory."
)]
pub struct HailstoneArgs {
    /// Path to a JSON limits file (digit_budget, display_limit, step_ceiling).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the exponentiation digit budget.
    #[arg(long, global = true, value_name = "DIGITS")]
    pub digit_budget: Option<u32>,

    /// Override the defensive trajectory step ceiling.
    #[arg(long, global = true, value_name = "STEPS")]
    pub step_ceiling: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate an expression and print the validated positive integer.
    Eval {
        /// The expression to evaluate, e.g. "27" or "10^25".
        #[arg(required = true)]
        expr: String,
    },
    /// Print the trajectory as a truncated decimal listing.
    Seq {
        #[arg(required = true)]
        expr: String,
        /// Maximum elements to display before the truncation marker.
        #[arg(long, value_name = "COUNT")]
        limit: Option<usize>,
        /// Print step index and natural log instead of raw values.
        #[arg(long, conflicts_with = "json")]
        log: bool,
        /// Emit the natural-log point series as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Export the full trajectory as Step,Value CSV.
    Export {
        #[arg(required = true)]
        expr: String,
        /// Destination file.
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Print sequence length (excluding the start) and peak value.
    Summary {
        #[arg(required = true)]
        expr: String,
    },
    /// Generate an arithmetic verification question, or check an answer.
    Challenge {
        /// Seed for a reproducible question.
        #[arg(long)]
        seed: Option<u64>,
        /// Check this answer against the (seeded) question.
        #[arg(long, requires = "seed")]
        answer: Option<u32>,
    },
}
