use serde_json::Value;
use std::io::{self, Write};

/// Pretty JSON on stdout, newline terminated.
pub fn print_json(value: &Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)
}
