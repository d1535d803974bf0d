// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Background reporting of redaction events to the compliance dashboard
//
// One bounded queue feeds a single worker thread that owns its own
// current-thread tokio runtime. Enqueueing never blocks the redacting
// thread; a full queue drops the batch.

use serde::Serialize;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, error, warn};

use super::error::{RedactError, ReportError};
use super::replacement::RedactionEvent;

pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Callback for failed reports when `fail_silent` is off
pub type ReportErrorHook = Arc<dyn Fn(&ReportError) + Send + Sync>;

/// Request body posted to the dashboard
#[derive(Debug, Serialize)]
pub struct EventBatch<'a> {
    pub sdk_version: &'a str,
    pub sdk_language: &'a str,
    pub events: &'a [RedactionEvent],
}

/// Everything the worker needs to post a batch
pub struct ReporterSettings {
    pub api_url: String,
    pub api_key: String,
    pub timeout: Duration,
    pub fail_silent: bool,
    pub sdk_language: String,
    pub queue_capacity: usize,
    pub on_error: Option<ReportErrorHook>,
}

struct Endpoint {
    client: reqwest::Client,
    url: String,
    api_key: String,
    timeout: Duration,
    fail_silent: bool,
    sdk_language: String,
    on_error: Option<ReportErrorHook>,
}

impl Endpoint {
    async fn post(&self, events: &[RedactionEvent]) -> Result<(), ReportError> {
        let batch = EventBatch {
            sdk_version: SDK_VERSION,
            sdk_language: &self.sdk_language,
            events,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&batch)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ReportError::Timeout(self.timeout)
                } else {
                    ReportError::Transport(err)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::Status(status));
        }
        Ok(())
    }

    fn handle_failure(&self, err: &ReportError) {
        if self.fail_silent {
            debug!(error = %err, "event report failed");
            return;
        }

        error!(error = %err, url = %self.url, "event report failed");
        if let Some(hook) = &self.on_error {
            hook(err);
        }
    }
}

/// Fire-and-forget event reporter
pub struct Reporter {
    sender: Option<mpsc::Sender<Vec<RedactionEvent>>>,
    worker: Option<JoinHandle<()>>,
}

impl Reporter {
    /// Spawn the worker thread
    pub fn start(settings: ReporterSettings) -> Result<Self, RedactError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let client = {
            let _guard = runtime.enter();
            reqwest::Client::builder()
                .timeout(settings.timeout)
                .build()?
        };

        let endpoint = Endpoint {
            client,
            url: settings.api_url,
            api_key: settings.api_key,
            timeout: settings.timeout,
            fail_silent: settings.fail_silent,
            sdk_language: settings.sdk_language,
            on_error: settings.on_error,
        };

        let (sender, receiver) = mpsc::channel(settings.queue_capacity.max(1));
        let worker = std::thread::Builder::new()
            .name("redactpii-reporter".to_string())
            .spawn(move || runtime.block_on(run_worker(receiver, endpoint)))?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Queue a batch without blocking; empty batches are ignored
    pub fn report(&self, events: Vec<RedactionEvent>) {
        if events.is_empty() {
            return;
        }
        let Some(sender) = &self.sender else {
            return;
        };

        match sender.try_send(events) {
            Ok(()) => {}
            Err(TrySendError::Full(events)) => {
                warn!(
                    events = events.len(),
                    "reporter queue full, dropping redaction events"
                );
            }
            Err(TrySendError::Closed(_)) => {
                debug!("reporter stopped, dropping redaction events");
            }
        }
    }

    /// Close the queue and wait for queued batches to be sent
    pub fn shutdown(mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("reporter worker panicked");
            }
        }
    }
}

impl Drop for Reporter {
    fn drop(&mut self) {
        // Closing the queue lets the worker finish on its own
        self.sender.take();
    }
}

async fn run_worker(mut receiver: mpsc::Receiver<Vec<RedactionEvent>>, endpoint: Endpoint) {
    while let Some(events) = receiver.recv().await {
        match endpoint.post(&events).await {
            Ok(()) => debug!(events = events.len(), "reported redaction events"),
            Err(err) => endpoint.handle_failure(&err),
        }
    }
    debug!("reporter queue closed");
}
