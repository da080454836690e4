//! The formtree Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions. Forms are loaded as `Node<String>` trees from
//! YAML or JSON, normalized, and optionally filled from a JSON snapshot.

use std::{fs, path::Path as FsPath, process};

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::args::{Command, FormInput, FormtreeArgs},
    errors::{FieldError, FormtreeError},
    json::{self, ImportOptions},
    render,
    tree::{Node, Path},
};

pub mod args;
pub mod output;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "FORMTREE_LOG";

/// The main entry point for the CLI.
pub fn run() {
    let args = FormtreeArgs::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Command::Check { input, submit } => handle_check(&input, submit),
        Command::Export { input } => handle_export(&input),
        Command::Paths { input } => handle_paths(&input),
        Command::View { input } => handle_view(&input),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "formtree=debug" } else { "formtree=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

/// Returns `Ok(false)` when the form has errors to report.
fn handle_check(input: &FormInput, submit: bool) -> Result<bool, FormtreeError> {
    let mut form = load_input(input)?;
    if submit {
        form = form.touch_all().validate();
    }

    let errors: Vec<(Path, FieldError<String>)> = form
        .iter()
        .flat_map(|(path, node)| {
            node.visible_errors()
                .into_iter()
                .map(move |error| (path.clone(), error.clone()))
        })
        .collect();

    if errors.is_empty() {
        output::print_success("form is valid");
        return Ok(true);
    }
    output::print_field_errors(&errors);
    output::print_failure(&format!("{} error(s) found", errors.len()));
    Ok(false)
}

fn handle_export(input: &FormInput) -> Result<bool, FormtreeError> {
    let form = load_input(input)?;
    let exported = json::to_json(&form)?;
    output::print_json(&exported);
    Ok(true)
}

fn handle_paths(input: &FormInput) -> Result<bool, FormtreeError> {
    let form = load_input(input)?;
    output::print_paths(&json::names_to_paths(&form));
    Ok(true)
}

fn handle_view(input: &FormInput) -> Result<bool, FormtreeError> {
    let form = load_input(input)?;
    let view = serde_json::to_value(render::view(&form)).map_err(|e| FormtreeError::Definition {
        path: input.form.display().to_string(),
        message: e.to_string(),
    })?;
    output::print_json(&view);
    Ok(true)
}

// ============================================================================
// LOADING
// ============================================================================

fn load_input(input: &FormInput) -> Result<Node<String>, FormtreeError> {
    let form = load_form(&input.form)?;
    let Some(data_path) = &input.data else {
        return Ok(form);
    };
    let data = load_data(data_path)?;
    let options = ImportOptions {
        strict: !input.lenient,
    };
    info!(data = %data_path.display(), strict = options.strict, "importing values");
    Ok(json::update_values_from_json_with(&form, &data, options)?)
}

/// Reads a form definition and brings it into constructed shape.
pub fn load_form(path: &FsPath) -> Result<Node<String>, FormtreeError> {
    let source = read_file(path)?;
    let location = path.display().to_string();
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    debug!(path = %location, json = is_json, "loading form definition");

    let form: Node<String> = if is_json {
        serde_json::from_str(&source).map_err(|e| FormtreeError::Definition {
            path: location.clone(),
            message: e.to_string(),
        })?
    } else {
        serde_yaml::from_str(&source).map_err(|e| FormtreeError::Definition {
            path: location,
            message: e.to_string(),
        })?
    };
    Ok(form.normalized())
}

fn load_data(path: &FsPath) -> Result<serde_json::Value, FormtreeError> {
    let source = read_file(path)?;
    serde_json::from_str(&source).map_err(|source| FormtreeError::Data {
        path: path.display().to_string(),
        source,
    })
}

fn read_file(path: &FsPath) -> Result<String, FormtreeError> {
    fs::read_to_string(path).map_err(|source| FormtreeError::Io {
        path: path.display().to_string(),
        source,
    })
}
