use super::command::CommandSpec;
use super::step::{Step, StepStatus};
use crate::chooser::Chooser;
use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// One selectable option of a [`ChoiceStep`]: a label and the commands it
/// stands for. An option with no commands is a skip.
pub struct Choice {
    pub label: String,
    pub commands: Vec<CommandSpec>,
}

impl Choice {
    pub fn new(label: &str, commands: Vec<CommandSpec>) -> Self {
        Self {
            label: label.to_string(),
            commands,
        }
    }

    pub fn skip(label: &str) -> Self {
        Self::new(label, Vec::new())
    }
}

/// A step that asks the user to pick among named options, then runs the
/// commands mapped to the selection in order. Picking a skip option runs
/// nothing and still counts as success.
pub struct ChoiceStep {
    name: String,
    prompt: String,
    choices: Vec<Choice>,
    default: usize,
    chooser: Arc<dyn Chooser>,
}

impl ChoiceStep {
    pub fn new(
        name: &str,
        prompt: &str,
        choices: Vec<Choice>,
        default: usize,
        chooser: Arc<dyn Chooser>,
    ) -> Self {
        Self {
            name: name.to_string(),
            prompt: prompt.to_string(),
            choices,
            default,
            chooser,
        }
    }
}

#[async_trait]
impl Step for ChoiceStep {
    async fn execute(&self, working_dir: &Path) -> Result<StepStatus> {
        let labels: Vec<String> = self.choices.iter().map(|c| c.label.clone()).collect();
        let selected = self.chooser.select(&self.prompt, &labels, self.default)?;
        let choice = &self.choices[selected];

        if choice.commands.is_empty() {
            info!("{}: {}, nothing to run", self.name, choice.label);
            return Ok(StepStatus::Skipped);
        }

        for command in &choice.commands {
            command.run(working_dir).await?;
        }

        Ok(StepStatus::Done)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
