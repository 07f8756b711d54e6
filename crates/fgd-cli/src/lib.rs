//! CLI logic for the FGD tool.
//!
//! The binary checks, reformats and creates FGD files. Everything except
//! argument parsing, logger setup and report rendering lives here so the
//! commands can be driven from tests.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use fgd::{Diagnostic, FgdBuilder, FgdError};

/// What a command leaves for the caller to report.
#[derive(Debug, Default)]
pub struct Outcome {
    source: String,
    diagnostics: Vec<Diagnostic>,
    failed: bool,
}

impl Outcome {
    /// The parsed source text, empty when no file was read.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether the process should exit with a failure status.
    pub fn failed(&self) -> bool {
        self.failed
    }
}

/// Run the FGD CLI application
///
/// # Errors
///
/// Returns `FgdError` for:
/// - File I/O errors
/// - Configuration loading errors
pub fn run(args: &Args) -> Result<Outcome, FgdError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = FgdBuilder::new(app_config);

    match &args.command {
        Command::Check { input } => {
            let source = fs::read_to_string(input)?;
            let parsed = builder.parse(&source);
            let failed = parsed.has_errors();
            let (document, diagnostics) = parsed.into_parts();
            info!(
                input_path = input,
                elements = document.len(),
                diagnostics = diagnostics.len();
                "Checked file"
            );
            Ok(Outcome {
                source,
                diagnostics,
                failed,
            })
        }
        Command::Format { input, output } => {
            let source = fs::read_to_string(input)?;
            let parsed = builder.parse(&source);
            let text = builder.serialize(parsed.document());
            write_output(output.as_deref(), &text)?;
            info!(input_path = input; "Formatted file");
            Ok(Outcome {
                source,
                diagnostics: parsed.into_parts().1,
                failed: false,
            })
        }
        Command::New { output } => {
            let document = fgd::template_document()?;
            write_output(output.as_deref(), &builder.serialize(&document))?;
            info!("Template written");
            Ok(Outcome::default())
        }
    }
}

fn write_output(path: Option<&str>, text: &str) -> io::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text)?;
            info!(output_path = path; "Output written");
            Ok(())
        }
        None => io::stdout().lock().write_all(text.as_bytes()),
    }
}
