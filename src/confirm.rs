//! Confirmation gate in front of every trigger.

use std::io::{BufRead, Write};
use std::sync::Mutex;

/// Asks the editor to approve an overwrite
///
/// Blocks until the editor has answered. Returning `false` must leave
/// everything as it was.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Approves everything (`--yes`)
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Asks on a line-based terminal; only `y`/`yes` approves
pub struct PromptConfirm<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }
}

impl PromptConfirm<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn terminal() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&self, prompt: &str) -> bool {
        let (Ok(mut input), Ok(mut output)) = (self.input.lock(), self.output.lock()) else {
            return false;
        };

        if write!(output, "{} [y/N] ", prompt)
            .and_then(|_| output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(answer: &str) -> (bool, String) {
        let mut output = Vec::new();
        let approved = {
            let confirm = PromptConfirm::new(Cursor::new(answer.as_bytes().to_vec()), &mut output);
            confirm.confirm("Overwrite?")
        };
        (approved, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_prompt_yes() {
        let (approved, output) = ask("y\n");
        assert!(approved);
        assert_eq!(output, "Overwrite? [y/N] ");

        assert!(ask("YES\n").0);
    }

    #[test]
    fn test_prompt_anything_else_declines() {
        assert!(!ask("n\n").0);
        assert!(!ask("\n").0);
        assert!(!ask("sure\n").0);
    }

    #[test]
    fn test_prompt_eof_declines() {
        assert!(!ask("").0);
    }

    #[test]
    fn test_closure_confirm() {
        let decline = |_: &str| false;
        assert!(!decline.confirm("anything"));
        assert!(AutoConfirm.confirm("anything"));
    }
}
