//! Terminal front end: a [`Prompter`] over any line reader and writer.

use std::io::{self, BufRead, Write};

use crate::adventure::prompt::Prompter;

pub struct ConsoleIo<R, W> {
    input: R,
    output: W,
}

impl ConsoleIo<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        ConsoleIo::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleIo<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsoleIo { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for ConsoleIo<R, W> {
    fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{}", text) {
            log::warn!("console: write failed: {}", e);
        }
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        if let Err(e) = write!(self.output, "{}", prompt).and_then(|_| self.output.flush()) {
            log::warn!("console: write failed: {}", e);
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                log::warn!("console: read failed: {}", e);
                None
            }
        }
    }
}
