//! Shared output layer for human/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: key/value or line-per-row text for humans, stable JSON for
//! machines. Errors render the core's typed taxonomy — validation failures
//! keep their field → messages shape, everything else uses a
//! `{code, message, status}` envelope — so callers never parse message text.

use ladder_core::{LadderError, StatusClass};
use serde::Serialize;
use std::io::{self, Write};

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON (one object per result, or a JSON array).
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Stable JSON error envelope.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
    status: StatusClass,
}

/// Render a serializable value: pretty JSON in JSON mode, the provided
/// formatter otherwise.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human: impl FnOnce(&mut dyn Write, &T) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut w = stdout.lock();
    match mode {
        OutputMode::Json => writeln!(w, "{}", serde_json::to_string_pretty(value)?)?,
        OutputMode::Human => human(&mut w, value)?,
    }
    Ok(())
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

/// Render a core error and return it as the command's failure.
pub fn fail<T>(mode: OutputMode, err: LadderError) -> anyhow::Result<T> {
    match mode {
        OutputMode::Json => {
            let body = match &err {
                LadderError::Validation(errors) => serde_json::to_string(errors)?,
                other => serde_json::to_string(&ErrorBody {
                    code: other.kind(),
                    message: other.to_string(),
                    status: other.status(),
                })?,
            };
            println!("{body}");
        }
        OutputMode::Human => eprintln!("error: {err}"),
    }
    Err(err.into())
}
