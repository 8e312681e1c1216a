//! Per-pipeline request lifecycle.

use std::sync::atomic::{AtomicBool, Ordering};

use vitalis_core::error::{Result, VitalisError};

/// What a pipeline's view shows: nothing yet, a spinner, a result or an
/// error panel with a retry action.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Settles a finished request. Errors are replaced by `failure_message`
    /// so the view never shows raw service output.
    pub fn settle(result: Result<T>, failure_message: &str) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) if err.is_validation() => Self::Failed(validation_text(&err)),
            Err(_) => Self::Failed(failure_message.to_string()),
        }
    }
}

fn validation_text(err: &VitalisError) -> String {
    match err {
        VitalisError::Validation(message) => message.clone(),
        other => other.to_string(),
    }
}

/// At most one request per pipeline may be pending.
#[derive(Debug)]
pub struct InFlight {
    pipeline: &'static str,
    busy: AtomicBool,
}

impl InFlight {
    pub const fn new(pipeline: &'static str) -> Self {
        Self {
            pipeline,
            busy: AtomicBool::new(false),
        }
    }

    /// Marks the pipeline busy until the returned guard drops.
    pub fn begin(&self) -> Result<InFlightGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| VitalisError::in_flight(self.pipeline))?;
        Ok(InFlightGuard { busy: &self.busy })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

pub struct InFlightGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
