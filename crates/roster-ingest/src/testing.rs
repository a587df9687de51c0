//! In-memory doubles for the transport and sleeper seams.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::{FetchError, Result};
use crate::retry::Sleeper;
use crate::transport::{Transport, TransportResponse};

#[derive(Debug, Default)]
struct Script {
    responses: HashMap<String, VecDeque<Result<TransportResponse>>>,
    requests: Vec<String>,
}

/// Replays queued responses per URL. An unscripted or drained URL answers 404.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue one response for `url`.
    #[must_use]
    pub fn respond(self, url: impl Into<String>, response: Result<TransportResponse>) -> Self {
        self.lock()
            .responses
            .entry(url.into())
            .or_default()
            .push_back(response);
        self
    }

    /// Queue a 200 response with `body`.
    #[must_use]
    pub fn ok(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.respond(url, Ok(TransportResponse::ok(body)))
    }

    /// Queue `times` timeouts for `url`.
    #[must_use]
    pub fn timeouts(self, url: impl Into<String>, times: usize) -> Self {
        let url = url.into();
        (0..times).fold(self, |transport, _| {
            let err = FetchError::Timeout { url: url.clone() };
            transport.respond(url.clone(), Err(err))
        })
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.lock().requests.iter().filter(|seen| *seen == url).count()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str) -> Result<TransportResponse> {
        let mut script = self.lock();
        script.requests.push(url.to_string());
        script
            .responses
            .get_mut(url)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Ok(TransportResponse {
                    status: 404,
                    body: String::new(),
                })
            })
    }
}

/// Records requested pauses instead of sleeping.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    slept: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<Duration> {
        self.slept
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
    }
}
