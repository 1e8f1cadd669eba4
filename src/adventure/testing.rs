//! Test helpers: a prompter that replays canned answers and records everything shown.

use std::collections::VecDeque;

use super::prompt::Prompter;

#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    /// Every `say` text and every prompt, in order.
    pub transcript: Vec<String>,
    /// Number of `ask` calls made, including ones that hit the end of the script.
    pub asked: usize,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
            asked: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// True if any recorded line contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|l| l.contains(needle))
    }

    pub fn output(&self) -> String {
        self.transcript.join("\n")
    }
}

impl Prompter for ScriptedPrompter {
    fn say(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        self.asked += 1;
        self.transcript.push(prompt.to_string());
        self.answers.pop_front()
    }
}
