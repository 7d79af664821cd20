use std::io::{self, BufRead, Write};

use todo_client::Confirm;

/// Asks on stdout and reads a `y`/`yes` answer from stdin. Anything else,
/// including a read error or end of input, declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let mut stdout = io::stdout();
        if write!(stdout, "{prompt} [y/N] ").and_then(|_| stdout.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_yes(&answer),
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
