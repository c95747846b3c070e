use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use tokio::sync::oneshot;

use crate::error::ApiError;

const NO_OUTCOME: &str = "request ended without an outcome";

/// Handle to a request that is already in flight.
///
/// The spawned task owns the only sender and consumes it on completion, so
/// the outcome is delivered at most once; awaiting the handle consumes it, so
/// it is read at most once. If the task dies before sending, the handle
/// resolves to an error instead of hanging or going silent.
#[must_use = "a completion does nothing unless awaited"]
pub struct Completion<T> {
    rx: oneshot::Receiver<Result<T, ApiError>>,
}

impl<T: Send + 'static> Completion<T> {
    /// Runs `operation` on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn spawn<F>(operation: F) -> Self
    where
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let outcome = operation.await;
            // receiver gone means nobody is listening any more
            let _ = tx.send(outcome);
        });
        Self { rx }
    }
}

impl<T> Future for Completion<T> {
    type Output = Result<T, ApiError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match ready!(Pin::new(&mut self.rx).poll(cx)) {
            Ok(outcome) => Poll::Ready(outcome),
            Err(_) => Poll::Ready(Err(ApiError::unexpected(NO_OUTCOME))),
        }
    }
}
