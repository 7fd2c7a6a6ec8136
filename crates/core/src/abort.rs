use std::fmt;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbortReason(String);

impl AbortReason {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-side cancellation handle. The first `abort` wins; later calls are ignored.
#[derive(Debug)]
pub struct AbortController {
    tx: watch::Sender<Option<AbortReason>>,
}

impl Default for AbortController {
    fn default() -> Self {
        Self::new()
    }
}

impl AbortController {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            rx: self.tx.subscribe(),
        }
    }

    pub fn abort(&self, reason: impl Into<String>) {
        let reason = AbortReason::new(reason);
        self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason);
            true
        });
    }
}

#[derive(Debug, Clone)]
pub struct AbortSignal {
    rx: watch::Receiver<Option<AbortReason>>,
}

impl AbortSignal {
    pub fn reason(&self) -> Option<AbortReason> {
        self.rx.borrow().clone()
    }

    pub fn is_aborted(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Resolves once aborted. Never resolves if the controller is dropped unfired.
    pub async fn aborted(&self) -> AbortReason {
        let mut rx = self.rx.clone();
        loop {
            let current = rx.borrow_and_update().clone();
            if let Some(reason) = current {
                return reason;
            }
            if rx.changed().await.is_err() {
                return std::future::pending().await;
            }
        }
    }
}
