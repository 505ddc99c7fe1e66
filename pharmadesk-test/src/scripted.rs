use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use pharmadesk_client::{ApiError, ApiRequest, ApiResponse, Transport};
use serde_json::Value;

enum Step {
    Reply(Result<ApiResponse, ApiError>),
    /// Never answers; for exercising cancellation.
    Hang,
}

#[derive(Default)]
struct Script {
    steps: VecDeque<Step>,
    requests: Vec<ApiRequest>,
}

/// A [`Transport`] that answers from a queue and records what it was sent.
///
/// Clones share the same queue and log, so a test can keep a handle after
/// moving the transport into a client.
///
/// ```ignore
/// let transport = ScriptedTransport::new();
/// transport.respond(201, json!({"id": 1, "name": "Acme"}));
/// let api = ApiClient::new(transport.clone(), Session::new());
/// api.clients().create(&form).await?;
/// assert_eq!(transport.requests()[0].path, "/clients");
/// ```
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON answer.
    pub fn respond(&self, status: u16, body: Value) -> &Self {
        self.push(Step::Reply(Ok(ApiResponse::json_body(status, &body))))
    }

    /// Queue an answer with an empty body.
    pub fn respond_empty(&self, status: u16) -> &Self {
        self.push(Step::Reply(Ok(ApiResponse::new(status, ""))))
    }

    /// Queue a failure to obtain any answer.
    pub fn fail(&self, error: ApiError) -> &Self {
        self.push(Step::Reply(Err(error)))
    }

    /// Queue a request that never completes.
    pub fn hang(&self) -> &Self {
        self.push(Step::Hang)
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.script.lock().unwrap().requests.len()
    }

    fn push(&self, step: Step) -> &Self {
        self.script.lock().unwrap().steps.push_back(step);
        self
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let step = {
            let mut script = self.script.lock().unwrap();
            script.requests.push(request);
            script.steps.pop_front()
        };
        match step {
            Some(Step::Reply(result)) => result,
            Some(Step::Hang) => std::future::pending().await,
            None => Err(ApiError::unreachable("no scripted response left")),
        }
    }
}
