use std::cell::RefCell;
use std::collections::VecDeque;

use serde::Serialize;
use uuid::Uuid;

use crate::api::Api;
use crate::client::DpiClient;
use crate::context::Context;
use crate::error::ApiError;
use crate::export::MemorySink;
use crate::http::{HttpRequest, HttpResponse};
use crate::notify::{FixedAnswer, NotificationLog};
use crate::transport::Transport;
use crate::types::{Intervention, Patient};

pub(crate) const BASE_URL: &str = "http://dpi.test";

/// Replays queued responses in order and records every request.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, response: HttpResponse) {
        self.responses.borrow_mut().push_back(Ok(response));
    }

    pub(crate) fn push_json<T: Serialize>(&self, status: u16, value: &T) {
        let body = serde_json::to_vec(value).unwrap();
        self.push(HttpResponse::new(status, body));
    }

    pub(crate) fn push_err(&self, err: ApiError) {
        self.responses.borrow_mut().push_back(Err(err));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_string())))
    }
}

/// Scripted facade plus recording capabilities.
pub(crate) struct Fixture {
    pub(crate) api: Api<ScriptedTransport>,
    pub(crate) log: NotificationLog,
    pub(crate) confirm: FixedAnswer,
    pub(crate) sink: MemorySink,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::with_confirm(FixedAnswer::yes())
    }

    pub(crate) fn refusing() -> Self {
        Self::with_confirm(FixedAnswer::no())
    }

    fn with_confirm(confirm: FixedAnswer) -> Self {
        Self {
            api: Api::new(DpiClient::new(BASE_URL), ScriptedTransport::new()),
            log: NotificationLog::new(),
            confirm,
            sink: MemorySink::new(),
        }
    }

    pub(crate) fn transport(&self) -> &ScriptedTransport {
        self.api.transport()
    }

    pub(crate) fn ctx(&self) -> Context<'_, ScriptedTransport> {
        Context::new(&self.api, &self.log, &self.confirm, &self.sink)
    }
}

pub(crate) fn patient(n: u128, first: &str, last: &str) -> Patient {
    Patient {
        id: Uuid::from_u128(n),
        first_name: first.to_string(),
        last_name: last.to_string(),
        birth_date: "1970-01-01".to_string(),
    }
}

pub(crate) fn intervention(n: u128, location: &str) -> Intervention {
    Intervention {
        id: Uuid::from_u128(n),
        datetime: "2024-03-01T10:15".to_string(),
        location: location.to_string(),
        notes: String::new(),
    }
}
