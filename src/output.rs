//! Console output sinks injected into handlers.
//!
//! Handlers never print directly; they receive a [`ConsoleOutput`] and
//! write through it. [`StandardOutput`] targets stdout/stderr with ANSI
//! color when attached to a terminal; [`BufferedOutput`] captures
//! everything for assertions in tests.

use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Plain text sink.
pub trait Output {
    fn write(&self, text: &str);

    fn writeln(&self, text: &str) {
        self.write(text);
        self.write("\n");
    }
}

/// A console-grade sink with severity channels. Errors always reach
/// the error stream; regular and success output respect quiet mode.
pub trait ConsoleOutput: Output {
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
    fn success(&self, message: &str);
    fn is_quiet(&self) -> bool;
}

/// Stdout/stderr sink. Colors severity prefixes when the target stream
/// is a terminal; quiet mode drops everything except errors.
pub struct StandardOutput {
    stdout: Mutex<io::Stdout>,
    stderr: Mutex<io::Stderr>,
    quiet: bool,
    color_out: bool,
    color_err: bool,
}

impl StandardOutput {
    pub fn new() -> Self {
        Self::with_quiet(false)
    }

    pub fn with_quiet(quiet: bool) -> Self {
        let stdout = io::stdout();
        let stderr = io::stderr();
        let color_out = stdout.is_terminal();
        let color_err = stderr.is_terminal();
        Self {
            stdout: Mutex::new(stdout),
            stderr: Mutex::new(stderr),
            quiet,
            color_out,
            color_err,
        }
    }

    fn paint(text: &str, color: &str, enabled: bool) -> String {
        if enabled {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

impl Default for StandardOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for StandardOutput {
    fn write(&self, text: &str) {
        if self.quiet {
            return;
        }
        if let Ok(mut out) = self.stdout.lock() {
            let _ = out.write_all(text.as_bytes());
        }
    }
}

impl ConsoleOutput for StandardOutput {
    fn error(&self, message: &str) {
        if let Ok(mut err) = self.stderr.lock() {
            let prefix = Self::paint("Error:", RED, self.color_err);
            let _ = writeln!(err, "{prefix} {message}");
        }
    }

    fn warn(&self, message: &str) {
        if self.quiet {
            return;
        }
        if let Ok(mut err) = self.stderr.lock() {
            let prefix = Self::paint("Warning:", YELLOW, self.color_err);
            let _ = writeln!(err, "{prefix} {message}");
        }
    }

    fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        if let Ok(mut out) = self.stdout.lock() {
            let prefix = Self::paint("Success:", GREEN, self.color_out);
            let _ = writeln!(out, "{prefix} {message}");
        }
    }

    fn is_quiet(&self) -> bool {
        self.quiet
    }
}

/// Capturing sink for tests. Never colors, never quiet.
#[derive(Debug, Default)]
pub struct BufferedOutput {
    out: Mutex<String>,
    err: Mutex<String>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written to the regular stream so far.
    pub fn contents(&self) -> String {
        self.out.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Everything written to the error stream so far.
    pub fn error_contents(&self) -> String {
        self.err.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Output for BufferedOutput {
    fn write(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            out.push_str(text);
        }
    }
}

impl ConsoleOutput for BufferedOutput {
    fn error(&self, message: &str) {
        if let Ok(mut err) = self.err.lock() {
            err.push_str("Error: ");
            err.push_str(message);
            err.push('\n');
        }
    }

    fn warn(&self, message: &str) {
        if let Ok(mut err) = self.err.lock() {
            err.push_str("Warning: ");
            err.push_str(message);
            err.push('\n');
        }
    }

    fn success(&self, message: &str) {
        if let Ok(mut out) = self.out.lock() {
            out.push_str("Success: ");
            out.push_str(message);
            out.push('\n');
        }
    }

    fn is_quiet(&self) -> bool {
        false
    }
}
