//! Yes/no confirmation on the terminal.

use std::io::{self, BufRead, Write};

/// Ask `question` and read one line; only "y"/"yes" (any case) confirm.
/// End of input counts as "no".
pub fn confirm(question: &str, mut input: impl BufRead, mut output: impl Write) -> io::Result<bool> {
    write!(output, "{question} [y/N] ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(false);
    }
    Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Block until the user presses Enter.
pub fn wait_for_enter(message: &str, mut input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    write!(output, "{message}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}
