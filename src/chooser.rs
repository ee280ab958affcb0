use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Select};

/// Prompt capability used by choice steps. The runner never talks to the
/// terminal directly, so tests can supply canned answers.
pub trait Chooser: Send + Sync {
    /// Present a single-select list and return the index of the chosen entry.
    fn select(&self, prompt: &str, labels: &[String], default: usize) -> Result<usize>;

    /// Ask a yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Interactive chooser backed by `dialoguer`. Blocks until the user answers.
pub struct TermChooser;

impl Chooser for TermChooser {
    fn select(&self, prompt: &str, labels: &[String], default: usize) -> Result<usize> {
        // Add (Default) suffix to the entry picked by just pressing Enter
        let display_labels: Vec<String> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                if i == default {
                    format!("{} (Default)", label)
                } else {
                    label.clone()
                }
            })
            .collect();

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(&display_labels)
            .default(default)
            .interact()?;

        Ok(selection)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact()?;

        Ok(answer)
    }
}

/// Non-interactive chooser that answers every prompt with its default.
/// Selected by the `--no-interaction` flag.
pub struct DefaultChooser;

impl Chooser for DefaultChooser {
    fn select(&self, _prompt: &str, _labels: &[String], default: usize) -> Result<usize> {
        Ok(default)
    }

    fn confirm(&self, _prompt: &str, default: bool) -> Result<bool> {
        Ok(default)
    }
}
