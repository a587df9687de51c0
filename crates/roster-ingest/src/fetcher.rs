//! One fetch of one source for one organization.

use std::time::Instant;

use roster_model::{FetchOptions, Organization, SourceKind};
use tracing::{debug, error, info, info_span, warn};

use crate::endpoint::{accept, endpoints};
use crate::error::{FetchError, FetchFailure};
use crate::retry::{RetryPolicy, RetryState, Sleeper};
use crate::transport::Transport;

/// An accepted response body together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload {
    pub organization: String,
    pub source_kind: SourceKind,
    pub endpoint: &'static str,
    pub url: String,
    pub body: String,
    /// Attempts spent on the endpoint that produced this payload.
    pub attempts: u32,
}

/// Fetches source documents with retry, backoff and endpoint fallback.
pub struct SourceFetcher<T, S> {
    transport: T,
    sleeper: S,
    policy: RetryPolicy,
    options: FetchOptions,
}

impl<T: Transport, S: Sleeper> SourceFetcher<T, S> {
    pub fn new(transport: T, sleeper: S, options: &FetchOptions) -> Self {
        Self {
            transport,
            sleeper,
            policy: RetryPolicy::from_options(options),
            options: options.clone(),
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// First accepted payload across the source's endpoints.
    pub fn fetch(
        &self,
        organization: &Organization,
        kind: SourceKind,
    ) -> Result<RawPayload, FetchFailure> {
        self.fetch_until(organization, kind, Some)
    }

    /// Walk the source's endpoints in order until `extract` produces a value.
    ///
    /// Each endpoint gets the full retry budget. An accepted payload for which
    /// `extract` returns `None` moves on to the next endpoint without retrying.
    pub fn fetch_until<R>(
        &self,
        organization: &Organization,
        kind: SourceKind,
        mut extract: impl FnMut(RawPayload) -> Option<R>,
    ) -> Result<R, FetchFailure> {
        let span = info_span!("fetch", organization = organization.code, source = %kind);
        let _guard = span.enter();
        let start = Instant::now();
        let mut total_attempts = 0;
        let mut last_error = None;

        for endpoint in endpoints(kind) {
            let url = endpoint.url(kind, organization, &self.options);
            match self.fetch_endpoint(kind, &url) {
                Ok((body, attempts)) => {
                    total_attempts += attempts;
                    let payload = RawPayload {
                        organization: organization.code.to_string(),
                        source_kind: kind,
                        endpoint: endpoint.name,
                        url: url.clone(),
                        body,
                        attempts,
                    };
                    if let Some(value) = extract(payload) {
                        info!(
                            endpoint = endpoint.name,
                            attempts = total_attempts,
                            duration_ms = start.elapsed().as_millis(),
                            "fetch complete"
                        );
                        return Ok(value);
                    }
                    warn!(
                        endpoint = endpoint.name,
                        url = %url,
                        "payload yielded no records, trying next endpoint"
                    );
                    last_error = Some(FetchError::Malformed {
                        url,
                        reason: "payload yielded no records".to_string(),
                    });
                }
                Err((err, attempts)) => {
                    total_attempts += attempts;
                    last_error = Some(err);
                }
            }
        }

        let last_error = last_error
            .unwrap_or_else(|| FetchError::InvalidRequest(format!("no endpoints for {kind}")));
        error!(
            attempts = total_attempts,
            error = %last_error,
            "all endpoints exhausted"
        );
        Err(FetchFailure {
            organization: organization.code.to_string(),
            source_kind: kind,
            attempts: total_attempts,
            last_error,
        })
    }

    /// Drive the retry state machine against one URL.
    fn fetch_endpoint(
        &self,
        kind: SourceKind,
        url: &str,
    ) -> Result<(String, u32), (FetchError, u32)> {
        let max_attempts = self.policy.max_attempts;
        let mut state = self.policy.start();
        loop {
            let attempt = match state {
                RetryState::Attempting(attempt) => attempt,
                RetryState::Waiting { attempt, delay } => {
                    debug!(url, attempt, delay_ms = delay.as_millis(), "backing off");
                    self.sleeper.sleep(delay);
                    state = state.resume();
                    continue;
                }
                RetryState::Succeeded { attempts } | RetryState::Exhausted { attempts } => {
                    return Err((
                        FetchError::InvalidRequest(format!("retry loop ended early for {url}")),
                        attempts,
                    ));
                }
            };

            debug!(url, attempt, max_attempts, "fetch attempt");
            let outcome = self.attempt(kind, url);
            state = state.on_outcome(&self.policy, outcome.as_ref().map(|_| ()));
            match outcome {
                Ok(body) => {
                    info!(
                        url,
                        attempt,
                        max_attempts,
                        bytes = body.len(),
                        "fetch attempt succeeded"
                    );
                    return Ok((body, attempt));
                }
                Err(err) => {
                    if let RetryState::Exhausted { attempts } = state {
                        warn!(
                            url,
                            attempt,
                            max_attempts,
                            error_kind = err.kind(),
                            error = %err,
                            "fetch attempt failed, endpoint exhausted"
                        );
                        return Err((err, attempts));
                    }
                    warn!(
                        url,
                        attempt,
                        max_attempts,
                        error_kind = err.kind(),
                        error = %err,
                        "fetch attempt failed"
                    );
                }
            }
        }
    }

    fn attempt(&self, kind: SourceKind, url: &str) -> Result<String, FetchError> {
        let response = self.transport.get(url)?;
        if !response.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        accept(kind, url, &response.body)?;
        Ok(response.body)
    }
}
