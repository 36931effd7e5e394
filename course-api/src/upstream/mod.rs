/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Outbound HTTP layer shared by the calendar and order integrations.
//!
//! Every attempt is bounded by a timeout and reads at most a configured
//! number of body bytes. Failures are classified into [`UpstreamError`] and
//! retryable ones are retried according to a [`RetryPolicy`].

mod retry;

pub use retry::{RetryDecision, RetryPolicy};

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::UpstreamConfig;

/// Upstream bodies are truncated to this many bytes before being logged or
/// carried in errors.
const MAX_ERROR_BODY_LEN: usize = 512;

/// Successful bodies larger than this are refused unless the client is
/// configured otherwise.
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Classified failure of an outbound request.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The attempt did not complete within the configured timeout.
    #[error("{service} request timed out")]
    Timeout { service: &'static str },

    /// Connection refused, reset, DNS failure and similar transport problems.
    #[error("{service} request failed: {detail}")]
    Network {
        service: &'static str,
        detail: String,
    },

    /// The upstream answered with a non-2xx status.
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// The upstream answered 2xx with a body we could not parse.
    #[error("{service} returned an unexpected body: {detail}")]
    Decode {
        service: &'static str,
        detail: String,
    },
}

impl UpstreamError {
    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            UpstreamError::Timeout { .. } | UpstreamError::Network { .. } => true,
            UpstreamError::Status { status, .. } => {
                *status >= 500 || *status == 408 || *status == 429
            }
            UpstreamError::Decode { .. } => false,
        }
    }

    pub fn service(&self) -> &'static str {
        match self {
            UpstreamError::Timeout { service }
            | UpstreamError::Network { service, .. }
            | UpstreamError::Status { service, .. }
            | UpstreamError::Decode { service, .. } => service,
        }
    }
}

/// HTTP client with per-attempt timeout and retry.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    timeout: Duration,
    policy: RetryPolicy,
    max_body_bytes: usize,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self::with_client(Client::new(), config.timeout, config.retry.clone())
            .with_max_body_bytes(config.max_body_bytes)
    }

    pub fn with_client(http: Client, timeout: Duration, policy: RetryPolicy) -> Self {
        Self {
            http,
            timeout,
            policy,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes.max(1);
        self
    }

    /// Send the request produced by `build` and decode a JSON response.
    ///
    /// `build` is called once per attempt, so it must produce an equivalent
    /// request each time (same idempotency key, same body).
    pub async fn send_json<T, F>(
        &self,
        service: &'static str,
        build: F,
    ) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut failures = 0u32;
        loop {
            let attempt = failures + 1;
            tracing::debug!(service, attempt, "Sending upstream request");

            let request = attempt_json(service, build(&self.http), self.max_body_bytes);
            let error = match tokio::time::timeout(self.timeout, request).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(err)) => err,
                Err(_) => UpstreamError::Timeout { service },
            };

            match self.policy.should_retry(failures, &error) {
                RetryDecision::Retry(delay) => {
                    tracing::warn!(
                        service,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Upstream request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    failures += 1;
                }
                RetryDecision::GiveUp => {
                    tracing::error!(
                        service,
                        attempt,
                        retryable = error.is_retryable(),
                        error = %error,
                        "Upstream request failed"
                    );
                    return Err(error);
                }
            }
        }
    }
}

async fn attempt_json<T: DeserializeOwned>(
    service: &'static str,
    request: RequestBuilder,
    max_body_bytes: usize,
) -> Result<T, UpstreamError> {
    let response = request
        .send()
        .await
        .map_err(|e| transport_error(service, e))?;

    let status = response.status();
    if !status.is_success() {
        // One byte past the limit so `truncate` still marks the cut.
        let (body, _) = read_capped(response, MAX_ERROR_BODY_LEN + 1)
            .await
            .unwrap_or_default();
        return Err(UpstreamError::Status {
            service,
            status: status.as_u16(),
            body: truncate(String::from_utf8_lossy(&body).into_owned()),
        });
    }

    let too_large = || UpstreamError::Decode {
        service,
        detail: format!("response body exceeds {max_body_bytes} bytes"),
    };
    if response
        .content_length()
        .is_some_and(|len| len > max_body_bytes as u64)
    {
        return Err(too_large());
    }
    let (bytes, overflowed) = read_capped(response, max_body_bytes)
        .await
        .map_err(|e| transport_error(service, e))?;
    if overflowed {
        return Err(too_large());
    }
    serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode {
        service,
        detail: e.to_string(),
    })
}

/// Read at most `limit` bytes of the body. The flag is set when the body
/// was longer and reading stopped early.
async fn read_capped(
    mut response: Response,
    limit: usize,
) -> Result<(Vec<u8>, bool), reqwest::Error> {
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let room = limit - body.len();
        if chunk.len() > room {
            body.extend_from_slice(&chunk[..room]);
            return Ok((body, true));
        }
        body.extend_from_slice(&chunk);
    }
    Ok((body, false))
}

fn transport_error(service: &'static str, err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout { service }
    } else {
        UpstreamError::Network {
            service,
            detail: err.to_string(),
        }
    }
}

fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY_LEN {
        let mut cut = MAX_ERROR_BODY_LEN;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push('…');
    }
    body
}
