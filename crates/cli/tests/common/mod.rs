#![allow(dead_code)]

use std::collections::VecDeque;

use laziest_cli::command_selection::{Item, Outcome, PickerOptions, Prompter};
use laziest_core::error::Result;

/// One scripted answer, consumed in order.
#[derive(Debug, Clone)]
pub enum Answer {
    Pick(Outcome),
    Text(String),
}

pub fn select(label: &str) -> Answer {
    Answer::Pick(Outcome::Select(label.to_string()))
}

pub fn text(value: &str) -> Answer {
    Answer::Text(value.to_string())
}

/// A picker session as the code under test requested it.
#[derive(Debug, Clone)]
pub struct Picked {
    pub prompt: String,
    pub items: Vec<Item>,
    pub options: PickerOptions,
}

impl Picked {
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }
}

/// Answers prompts from a fixed script and records what was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub picks: Vec<Picked>,
    pub inputs: Vec<String>,
    pub messages: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            ..Self::default()
        }
    }

    pub fn finished(&self) -> bool {
        self.answers.is_empty()
    }
}

impl Prompter for ScriptedPrompter {
    fn pick(&mut self, prompt: &str, items: Vec<Item>, options: PickerOptions) -> Result<Outcome> {
        self.picks.push(Picked {
            prompt: prompt.to_string(),
            items,
            options,
        });

        match self.answers.pop_front() {
            Some(Answer::Pick(outcome)) => Ok(outcome),
            other => panic!("expected a pick answer for `{prompt}`, got {other:?}"),
        }
    }

    fn input(&mut self, prompt: &str, _initial: &str) -> Result<String> {
        self.inputs.push(prompt.to_string());

        match self.answers.pop_front() {
            Some(Answer::Text(value)) => Ok(value),
            other => panic!("expected a text answer for `{prompt}`, got {other:?}"),
        }
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}
