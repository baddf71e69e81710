use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::client::LanguageModel;

/// Deterministic model for tests: pops pre-seeded responses in order and
/// errors once exhausted.
pub struct ScriptedModel {
    responses: Mutex<VecDeque<String>>,
}

impl ScriptedModel {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn infer(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String> {
        self.responses
            .lock()
            .map_err(|_| anyhow!("scripted model lock poisoned"))?
            .pop_front()
            .ok_or_else(|| anyhow!("scripted model exhausted"))
    }
}
