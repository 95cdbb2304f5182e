//! Stdin — the router only reads from a pipe, never an interactive terminal.

use std::io;

/// True when standard input is a FIFO.
#[cfg(unix)]
pub fn stdin_is_pipe() -> io::Result<bool> {
    use std::os::unix::fs::FileTypeExt;

    let metadata = std::fs::metadata("/dev/stdin")?;
    Ok(metadata.file_type().is_fifo())
}

/// True when standard input is not a terminal.
#[cfg(not(unix))]
pub fn stdin_is_pipe() -> io::Result<bool> {
    use std::io::IsTerminal;

    Ok(!io::stdin().is_terminal())
}
