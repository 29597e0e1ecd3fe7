use anyhow::Result;
#[cfg(test)]
use std::collections::VecDeque;
#[cfg(test)]
use std::sync::Mutex;

/// Trait for operator prompts to enable testing with mocks
pub trait UserInput: Send + Sync {
    /// Display a free-text prompt. A blank answer yields `default` when one is given.
    fn text(&self, prompt: &str, default: Option<&str>) -> Result<String>;
}

/// Real user input implementation using inquire crate
pub struct InquireUserInput;

impl UserInput for InquireUserInput {
    fn text(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        use inquire::Text;
        let mut text_prompt = Text::new(prompt);
        if let Some(default_val) = default {
            text_prompt = text_prompt.with_default(default_val);
        }
        let answer = text_prompt.prompt()?;
        Ok(answer)
    }
}

/// Mock user input implementation for testing
#[cfg(test)]
pub struct MockUserInput {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockUserInput {
    /// Create new mock with no pre-configured responses
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create mock with pre-configured responses
    pub fn with_responses(responses: &[&str]) -> Self {
        let mock = Self::new();
        for response in responses {
            mock.add_response(response);
        }
        mock
    }

    /// Add a response to the queue
    pub fn add_response(&self, response: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(response.to_string());
    }

    /// Prompts shown so far, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of responses not yet consumed
    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[cfg(test)]
impl Default for MockUserInput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl UserInput for MockUserInput {
    fn text(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let answer = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No more mock responses available"))?;

        match default {
            Some(default_val) if answer.is_empty() => Ok(default_val.to_string()),
            _ => Ok(answer),
        }
    }
}
