//! Handles user-facing output for the CLI.
//!
//! Normal command output flows through the [`OutputSink`] trait so tests
//! can capture it; status lines get termcolor treatment when stdout is a
//! terminal.

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Destination for rendered command output.
pub trait OutputSink {
    fn emit(&mut self, text: &str);
}

/// Collects output into a String for testing or programmatic capture.
#[derive(Default)]
pub struct OutputBuffer {
    pub buffer: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl OutputSink for OutputBuffer {
    fn emit(&mut self, text: &str) {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(text);
    }
}

/// Writes output to stdout for normal CLI use.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, text: &str) {
        println!("{text}");
    }
}

fn color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Prints a highlighted status line (counts, confirmations).
pub fn print_status(text: &str) {
    let mut stdout = StandardStream::stdout(color_choice());
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    println!("{text}");
    let _ = stdout.reset();
}

/// Prints a warning line (truncation notices).
pub fn print_warning(text: &str) {
    let mut stdout = StandardStream::stdout(color_choice());
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
    println!("{text}");
    let _ = stdout.reset();
}
