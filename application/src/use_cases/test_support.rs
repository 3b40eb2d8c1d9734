//! Scripted gateway shared by the use case tests.

use crate::config::FusionConfig;
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub(crate) fn test_config() -> FusionConfig {
    FusionConfig::new(["model-a", "model-b", "model-c"], "judge")
}

#[derive(Clone)]
struct Script {
    delay: Duration,
    result: Result<String, GatewayError>,
}

/// Gateway that answers each model id with a canned result after a delay
pub(crate) struct ScriptedGateway {
    scripts: HashMap<String, Script>,
    requests: Mutex<Vec<CompletionRequest>>,
    completed: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            requests: Mutex::new(Vec::new()),
            completed: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn reply(self, model: &str, text: &str) -> Self {
        self.reply_after(model, text, Duration::ZERO)
    }

    pub(crate) fn reply_after(mut self, model: &str, text: &str, delay: Duration) -> Self {
        self.scripts.insert(
            model.to_string(),
            Script {
                delay,
                result: Ok(text.to_string()),
            },
        );
        self
    }

    pub(crate) fn fail(mut self, model: &str, error: GatewayError) -> Self {
        self.scripts.insert(
            model.to_string(),
            Script {
                delay: Duration::ZERO,
                result: Err(error),
            },
        );
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn requests_for(&self, model: &str) -> Vec<CompletionRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.model_id == model)
            .collect()
    }

    pub(crate) fn completion_order(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());

        let script = self.scripts.get(&request.model_id).cloned().unwrap_or(Script {
            delay: Duration::ZERO,
            result: Err(GatewayError::UpstreamError(format!(
                "unscripted model {}",
                request.model_id
            ))),
        });

        if !script.delay.is_zero() {
            tokio::time::sleep(script.delay).await;
        }

        self.completed
            .lock()
            .unwrap()
            .push(request.model_id.clone());
        script.result
    }
}
