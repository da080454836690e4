//! Defines the command-line arguments and subcommands for the formtree CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "formtree",
    version,
    about = "Validate, inspect and export declarative form definitions."
)]
pub struct FormtreeArgs {
    /// Log at debug level. `FORMTREE_LOG` overrides this.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Arguments shared by every command that loads a form.
#[derive(Debug, clap::Args)]
pub struct FormInput {
    /// The form definition (YAML, or JSON by `.json` extension).
    #[arg(required = true)]
    pub form: PathBuf,

    /// A JSON snapshot of values to import into the form first.
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Skip data keys that no field is named for instead of failing.
    #[arg(long)]
    pub lenient: bool,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a form and report its errors.
    Check {
        #[command(flatten)]
        input: FormInput,

        /// Report every error, as a submit would, not only the visible ones.
        #[arg(long)]
        submit: bool,
    },
    /// Print the form's values as JSON.
    Export {
        #[command(flatten)]
        input: FormInput,
    },
    /// List the dotted name path of every named field.
    Paths {
        #[command(flatten)]
        input: FormInput,
    },
    /// Print the render-facing view of the form as JSON.
    View {
        #[command(flatten)]
        input: FormInput,
    },
}
