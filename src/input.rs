//! Interactive note input
//!
//! Reads a multi-line note from a terminal: one prompt per line, an empty
//! line ends the note.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::Result;

/// Prompt shown before each input line
pub const PROMPT: &str = ">";

/// Read lines from `input` until an empty line or end of input
///
/// Lines are joined with `\n`. The banner and prompts go to `output`.
pub fn read_note<R: BufRead, W: Write>(notes_file: &Path, input: R, mut output: W) -> Result<String> {
    writeln!(
        output,
        "you're writing in {}, enter empty line to end input",
        notes_file.display()
    )?;

    let mut lines = Vec::new();
    let mut source = input.lines();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let line = match source.next() {
            Some(line) => line?,
            None => break,
        };
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            break;
        }
        lines.push(line.to_string());
    }

    Ok(lines.join("\n"))
}
