//! Scripted transport and recording metrics for end-to-end retry tests.
//!
//! The script is a queue of per-attempt outcomes; each submission pops
//! the next entry, so tests can express sequences like "503, 503, 200"
//! without a live HTTP server.

use std::collections::VecDeque;
use std::future::Future;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fnrelay::metrics::RemoteInvocationMetrics;
use fnrelay::transport::{InvocationResponse, Transport};

/// One scripted attempt outcome.
#[derive(Debug, Clone)]
pub enum Step {
    /// Respond with a status and optional body text.
    Respond(u16, Option<&'static str>),
    /// Respond with a status whose body fails to read.
    RespondUnreadable(u16),
    /// Fail at the transport level with the given message.
    Fail(&'static str),
}

#[derive(Debug, Clone)]
pub struct Attempt {
    pub target: &'static str,
}

#[derive(Debug)]
pub struct ScriptedResponse {
    status: u16,
    body: Option<String>,
    body_readable: bool,
}

impl InvocationResponse for ScriptedResponse {
    fn status(&self) -> u16 {
        self.status
    }

    fn body_text(&self) -> io::Result<Option<String>> {
        if !self.body_readable {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "body stream ended early",
            ));
        }
        Ok(self.body.clone())
    }
}

struct TransportState {
    script: Mutex<VecDeque<Step>>,
    submissions: AtomicUsize,
}

/// Transport that replays a fixed script of attempt outcomes. Clones
/// share the script, so a test can keep one clone for assertions.
#[derive(Clone)]
pub struct ScriptedTransport {
    state: Arc<TransportState>,
}

impl ScriptedTransport {
    pub fn new(script: impl IntoIterator<Item = Step>) -> Self {
        Self {
            state: Arc::new(TransportState {
                script: Mutex::new(script.into_iter().collect()),
                submissions: AtomicUsize::new(0),
            }),
        }
    }

    /// Number of physical attempts submitted so far.
    pub fn submissions(&self) -> usize {
        self.state.submissions.load(Ordering::SeqCst)
    }

    /// Script entries not yet consumed.
    pub fn remaining(&self) -> usize {
        self.state.script.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    type Attempt = Attempt;
    type Response = ScriptedResponse;

    fn submit(
        &self,
        _attempt: Attempt,
    ) -> impl Future<Output = io::Result<ScriptedResponse>> + Send {
        self.state.submissions.fetch_add(1, Ordering::SeqCst);
        let step = self
            .state
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport script exhausted");
        async move {
            match step {
                Step::Respond(status, body) => Ok(ScriptedResponse {
                    status,
                    body: body.map(str::to_owned),
                    body_readable: true,
                }),
                Step::RespondUnreadable(status) => Ok(ScriptedResponse {
                    status,
                    body: None,
                    body_readable: false,
                }),
                Step::Fail(message) => {
                    Err(io::Error::new(io::ErrorKind::ConnectionReset, message))
                }
            }
        }
    }
}

/// Metrics sink that records everything for assertions.
#[derive(Debug, Default)]
pub struct RecordingMetrics {
    failures: AtomicUsize,
    latencies: Mutex<Vec<Duration>>,
}

impl RecordingMetrics {
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }

    pub fn latency_count(&self) -> usize {
        self.latencies.lock().unwrap().len()
    }
}

impl RemoteInvocationMetrics for RecordingMetrics {
    fn record_invocation_failure(&self) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }

    fn record_invocation_latency(&self, elapsed: Duration) {
        self.latencies.lock().unwrap().push(elapsed);
    }
}
