use std::io::{self, Write};

pub fn write_stdout_text(text: &str) -> io::Result<()> {
    write_tolerating_broken_pipe(&mut io::stdout().lock(), &[text.as_bytes()])
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    write_tolerating_broken_pipe(&mut io::stdout().lock(), &[text.as_bytes(), b"\n"])
}

/// Writes every chunk then flushes. A reader that hung up early (`tidyledger catalog | head`)
/// is not an error.
fn write_tolerating_broken_pipe<W: Write>(writer: &mut W, chunks: &[&[u8]]) -> io::Result<()> {
    for chunk in chunks {
        if let Err(error) = writer.write_all(chunk) {
            return ignore_broken_pipe(error);
        }
    }
    match writer.flush() {
        Ok(()) => Ok(()),
        Err(error) => ignore_broken_pipe(error),
    }
}

fn ignore_broken_pipe(error: io::Error) -> io::Result<()> {
    if error.kind() == io::ErrorKind::BrokenPipe {
        Ok(())
    } else {
        Err(error)
    }
}
