//! Response providers: where raw model text comes from.

use std::collections::VecDeque;

use tracing::debug;

use bloom_model::GenerationError;

/// Which generator task a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Alignment,
    Questions,
    Outline,
}

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Alignment => "alignment",
            Task::Questions => "questions",
            Task::Outline => "outline",
        }
    }
}

/// One chat completion request asking for a JSON object.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub task: Task,
    pub model: &'a str,
    pub system: &'a str,
    pub user: &'a str,
    pub max_output_tokens: u32,
}

/// Source of raw model output.
///
/// Implementations return the text the model produced; parsing and schema
/// validation happen in the caller. Transport failures are reported as
/// [`GenerationError::Provider`].
pub trait ResponseProvider {
    fn complete(&mut self, request: &ChatRequest<'_>) -> Result<String, GenerationError>;
}

/// Replays a fixed sequence of raw responses, one per request.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    responses: VecDeque<String>,
    tasks: Vec<Task>,
}

impl ScriptedProvider {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            tasks: Vec::new(),
        }
    }

    pub fn push(&mut self, response: impl Into<String>) {
        self.responses.push_back(response.into());
    }

    pub fn remaining(&self) -> usize {
        self.responses.len()
    }

    /// Tasks of the requests served so far, in order.
    pub fn served(&self) -> &[Task] {
        &self.tasks
    }
}

impl ResponseProvider for ScriptedProvider {
    fn complete(&mut self, request: &ChatRequest<'_>) -> Result<String, GenerationError> {
        let response = self.responses.pop_front().ok_or_else(|| {
            GenerationError::provider(format!(
                "no scripted response left for {} request",
                request.task.as_str()
            ))
        })?;
        debug!(task = request.task.as_str(), bytes = response.len(), "scripted response");
        self.tasks.push(request.task);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(task: Task) -> ChatRequest<'static> {
        ChatRequest {
            task,
            model: "test",
            system: "",
            user: "",
            max_output_tokens: 10,
        }
    }

    #[test]
    fn replays_in_order_then_fails() {
        let mut provider = ScriptedProvider::new(["first", "second"]);
        assert_eq!(provider.complete(&request(Task::Alignment)).unwrap(), "first");
        assert_eq!(provider.complete(&request(Task::Questions)).unwrap(), "second");
        assert_eq!(provider.served(), &[Task::Alignment, Task::Questions]);

        let err = provider.complete(&request(Task::Outline)).unwrap_err();
        assert!(matches!(err, GenerationError::Provider { .. }));
    }
}
