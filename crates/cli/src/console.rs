//! Where command output goes.
//!
//! Results go to stdout; table headers and other diagnostics go to stderr.

pub trait Console {
    /// Write result text to standard output.
    fn out(&mut self, text: &str);

    /// Write headers and diagnostics to standard error.
    fn err(&mut self, text: &str);
}

/// The process's real stdout/stderr.
pub struct Terminal;

impl Console for Terminal {
    fn out(&mut self, text: &str) {
        print!("{text}");
    }

    fn err(&mut self, text: &str) {
        eprint!("{text}");
    }
}

/// Captures output in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Captured {
    pub out: String,
    pub err: String,
}

#[cfg(test)]
impl Console for Captured {
    fn out(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn err(&mut self, text: &str) {
        self.err.push_str(text);
    }
}
