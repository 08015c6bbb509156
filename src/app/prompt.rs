//! Interactive base URL prompt.

use std::io::{self, BufRead, Write};

/// Prompt shown before reading the base URL from stdin.
pub(crate) const BASE_URL_PROMPT: &str = "Enter base player.fm URL: ";

/// Prints the prompt and returns the first whitespace-delimited token of the
/// next input line, or `None` when the line is blank or input has ended.
pub(crate) fn read_base_url<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<String>> {
    write!(output, "{BASE_URL_PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.split_whitespace().next().map(str::to_string))
}
