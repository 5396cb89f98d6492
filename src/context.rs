use tokio_util::sync::CancellationToken;

/// Cancellation-aware context handed to validation hooks.
///
/// The engine itself never checks for cancellation; hooks that do slow work
/// may consult [`is_cancelled`](Self::is_cancelled).
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: CancellationToken,
}

impl Context {
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }
}
