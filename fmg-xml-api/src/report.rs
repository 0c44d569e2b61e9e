//! Failure reporting.
//!
//! [`FmgClient`](crate::client::FmgClient) hands every failed call to an
//! [`ErrorReporter`] exactly once, immediately before returning the error.
//! Reporters observe only: they cannot change the error, and a panicking
//! reporter is contained by the client.

use crate::{catalog::Operation, error::FmgError};

/// Receives failed calls.
pub trait ErrorReporter: Send + Sync {
    /// Called once per failed call.
    fn report(&self, operation: Operation, error: &FmgError);
}

/// Reports failures as `tracing` events with target `fmg_error`.
///
/// The event is emitted inside the client's call span, so the call's
/// `request_id` travels with it.
///
/// # Examples
///
/// ```
/// use fmg_xml_api::{
///     catalog::Operation,
///     error::FmgError,
///     report::{ErrorReporter, TracingReporter},
/// };
///
/// TracingReporter.report(Operation::GetAdomList, &FmgError::Transport("timed out".to_owned()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, operation: Operation, error: &FmgError) {
        tracing::error!(
            target: "fmg_error",
            operation = %operation,
            kind = error.kind(),
            local = error.is_local(),
            "{error}"
        );
    }
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for std::sync::Arc<R> {
    fn report(&self, operation: Operation, error: &FmgError) {
        (**self).report(operation, error);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Default)]
    struct Collect(Mutex<Vec<(Operation, String)>>);

    impl ErrorReporter for Collect {
        fn report(&self, operation: Operation, error: &FmgError) {
            self.0.lock().unwrap().push((operation, error.kind().to_owned()));
        }
    }

    #[test]
    fn test_tracing_reporter_does_not_panic() {
        TracingReporter.report(Operation::AddAdom, &FmgError::Api { code: 1, message: "bad adom".to_owned() });
        TracingReporter.report(Operation::GetAdomList, &FmgError::Parse("no payload".to_owned()));
    }

    #[test]
    fn test_arc_reporter_forwards() {
        let inner = Arc::new(Collect::default());
        let shared: Arc<Collect> = Arc::clone(&inner);
        shared.report(Operation::DeleteDevice, &FmgError::Validation("missing".to_owned()));

        let seen = inner.0.lock().unwrap();
        assert_eq!(seen.as_slice(), [(Operation::DeleteDevice, "validation".to_owned())]);
    }
}
