//! Cancellation tied to the lifetime of the consumer that started a fetch.
//!
//! A [`CancelHandle`] stays with the consumer; the matching [`CancelToken`] travels with the
//! fetch. The token fires when the handle calls [`CancelHandle::cancel`] or is dropped, so a
//! consumer that goes away can never have a late response applied on its behalf.

use super::{ReportSource, SourceError};
use serde_json::Value;
use tokio::sync::watch;

#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

/// Creates a linked handle/token pair.
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once cancellation is requested or the handle is dropped.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        // An error means the handle was dropped, which also cancels.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// Fetches from `source` unless `token` fires first.
pub async fn fetch_cancellable<S: ReportSource>(
    source: &S,
    token: &CancelToken,
) -> Result<Value, SourceError> {
    if token.is_cancelled() {
        return Err(SourceError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = token.cancelled() => Err(SourceError::Cancelled),
        result = source.fetch() => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    struct SlowSource {
        delay: Duration,
    }

    impl ReportSource for SlowSource {
        fn origin(&self) -> String {
            "slow".to_string()
        }

        async fn fetch(&self) -> Result<Value, SourceError> {
            tokio::time::sleep(self.delay).await;
            Ok(json!({"ml_results": []}))
        }
    }

    #[test]
    fn test_fresh_token_is_not_cancelled() {
        let (_handle, token) = cancel_pair();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_marks_token() {
        let (handle, token) = cancel_pair();
        handle.cancel();
        assert!(token.is_cancelled());
        assert!(token.clone().is_cancelled());
    }

    #[test]
    fn test_dropping_handle_cancels() {
        let (handle, token) = cancel_pair();
        drop(handle);
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_fetch_completes_when_not_cancelled() {
        let (_handle, token) = cancel_pair();
        let source = SlowSource {
            delay: Duration::from_millis(1),
        };
        let body = fetch_cancellable(&source, &token).await.unwrap();
        assert_eq!(body, json!({"ml_results": []}));
    }

    #[tokio::test]
    async fn test_already_cancelled_never_fetches() {
        let (handle, token) = cancel_pair();
        handle.cancel();
        let source = SlowSource {
            delay: Duration::from_secs(3600),
        };
        let err = fetch_cancellable(&source, &token).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_in_flight_fetch() {
        let (handle, token) = cancel_pair();
        let source = SlowSource {
            delay: Duration::from_secs(3600),
        };

        let fetch = tokio::spawn(async move { fetch_cancellable(&source, &token).await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.cancel();

        let err = fetch.await.unwrap().unwrap_err();
        assert!(err.is_cancelled());
    }
}
