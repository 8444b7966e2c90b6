use std::sync::Mutex;

use async_trait::async_trait;

use crate::{Error, TextGenerator};

/// Returns the same text for every prompt and records the prompts it was given.
pub(crate) struct FakeTextGenerator {
    response: String,
    prompts: Mutex<Vec<String>>,
}

impl FakeTextGenerator {
    pub(crate) fn new(response: &str) -> Self {
        Self {
            response: response.to_owned(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for FakeTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        self.prompts.lock().unwrap().push(prompt.to_owned());

        Ok(self.response.clone())
    }
}

/// Fails every request, like an unreachable text generation service.
pub(crate) struct FailingTextGenerator;

#[async_trait]
impl TextGenerator for FailingTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, Error> {
        Err(Error::SummaryGenerationFailed(
            "connection refused".to_owned(),
        ))
    }
}
