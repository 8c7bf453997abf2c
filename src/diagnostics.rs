//! Uniform diagnostics prefixes for stderr output and error strings.

/// Print a recoverable warning to stderr.
pub fn warn(msg: impl AsRef<str>) {
    eprintln!("WARN: {}", msg.as_ref());
}

/// Format an error string with the uniform prefix.
pub fn error_message(msg: impl AsRef<str>) -> String {
    format!("ERROR: {}", msg.as_ref())
}
