//! Handles all user-facing output for the CLI.
//!
//! Colored status lines go through `termcolor`; field errors are rendered as
//! `miette` reports so they carry their diagnostic code and help text.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::{errors::FieldError, tree::Path};

// ============================================================================
// STATUS LINES
// ============================================================================

pub fn print_success(message: &str) {
    print_colored(ColorChoice::Auto, Color::Green, message);
}

pub fn print_failure(message: &str) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
    let _ = writeln!(stderr, "{}", message);
    let _ = stderr.reset();
}

// ============================================================================
// FIELD ERRORS
// ============================================================================

/// Prints one report per field error, tagged with the tree path of the field
/// it was found on.
pub fn print_field_errors(errors: &[(Path, FieldError<String>)]) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    for (path, error) in errors {
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
        let _ = writeln!(stderr, "at {}", path);
        let _ = stderr.reset();
        eprintln!("{:?}", miette::Report::new(error.clone()));
    }
}

/// Prints `(name path, tree path)` pairs as an aligned table.
pub fn print_paths(paths: &[(String, Path)]) {
    if paths.is_empty() {
        println!("  No named fields.");
        return;
    }
    let width = paths.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    for (name, path) in paths {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)));
        let _ = write!(stdout, "  {:width$}", name, width = width);
        let _ = stdout.reset();
        let _ = writeln!(stdout, "  {}", path);
    }
}

pub fn print_json(json: &serde_json::Value) {
    match serde_json::to_string_pretty(json) {
        Ok(text) => println!("{}", text),
        Err(e) => print_failure(&format!("failed to render JSON: {}", e)),
    }
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn print_colored(choice: ColorChoice, color: Color, message: &str) {
    let mut stdout = StandardStream::stdout(choice);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = writeln!(stdout, "{}", message);
    let _ = stdout.reset();
}
