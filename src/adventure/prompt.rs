/// Line-oriented conversation with the player.
///
/// Game operations never touch stdin/stdout directly; they talk through this trait so
/// the same code drives the console, the grid front end, and scripted tests.
pub trait Prompter {
    /// Show one line (or a block of lines) to the player.
    fn say(&mut self, text: &str);

    /// Show `prompt` and read one line of input, without the trailing newline.
    /// Returns `None` once input is exhausted.
    fn ask(&mut self, prompt: &str) -> Option<String>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn say(&mut self, text: &str) {
        (**self).say(text)
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        (**self).ask(prompt)
    }
}
