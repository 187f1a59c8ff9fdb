// Cancellation channel for multi-step handlers.
//
// A handler arms the signal for its lifetime through a `CancelGuard`; the
// guard disarms and clears it on drop, so a cancel raised in one handler can
// never leak into the next. Anything holding a clone can raise it: the
// session raises it when a prompt answer equals the cancel token, and a key
// listener or test can call `raise` directly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const DEFAULT_TOKEN: &str = "q";

#[derive(Debug)]
struct Inner {
    token: String,
    armed: AtomicBool,
    raised: AtomicBool,
}

#[derive(Debug, Clone)]
pub struct CancelSignal {
    inner: Arc<Inner>,
}

impl CancelSignal {
    /// Create a signal triggered by `token`. A blank token falls back to `q`.
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = match token.trim() {
            "" => DEFAULT_TOKEN.to_string(),
            trimmed => trimmed.to_string(),
        };
        CancelSignal {
            inner: Arc::new(Inner {
                token,
                armed: AtomicBool::new(false),
                raised: AtomicBool::new(false),
            }),
        }
    }

    pub fn token(&self) -> &str {
        &self.inner.token
    }

    /// Activate the channel until the returned guard is dropped.
    #[must_use = "the channel is disarmed as soon as the guard is dropped"]
    pub fn arm(&self) -> CancelGuard {
        self.inner.raised.store(false, Ordering::SeqCst);
        self.inner.armed.store(true, Ordering::SeqCst);
        CancelGuard {
            signal: self.clone(),
        }
    }

    pub fn is_armed(&self) -> bool {
        self.inner.armed.load(Ordering::SeqCst)
    }

    /// Request cancellation of the running handler. Ignored while disarmed.
    pub fn raise(&self) {
        if self.is_armed() {
            self.inner.raised.store(true, Ordering::SeqCst);
        }
    }

    pub fn is_raised(&self) -> bool {
        self.inner.raised.load(Ordering::SeqCst)
    }

    /// Whether `input` is the cancel token while the channel is armed.
    pub fn matches(&self, input: &str) -> bool {
        self.is_armed() && input.trim().eq_ignore_ascii_case(&self.inner.token)
    }

    /// Raise the signal if `input` is the cancel token. Returns whether the
    /// running handler should stop.
    pub fn intercept(&self, input: &str) -> bool {
        if self.matches(input) {
            self.raise();
        }
        self.is_raised()
    }

    fn disarm(&self) {
        self.inner.armed.store(false, Ordering::SeqCst);
        self.inner.raised.store(false, Ordering::SeqCst);
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        CancelSignal::new(DEFAULT_TOKEN)
    }
}

/// Scope of an armed channel.
#[derive(Debug)]
pub struct CancelGuard {
    signal: CancelSignal,
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        self.signal.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_is_ignored_while_disarmed() {
        let signal = CancelSignal::default();
        signal.raise();
        assert!(!signal.is_raised());
        assert!(!signal.matches("q"));
    }

    #[test]
    fn guard_scopes_the_channel() {
        let signal = CancelSignal::default();
        {
            let _armed = signal.arm();
            assert!(signal.is_armed());
            assert!(signal.intercept("Q "));
            assert!(signal.is_raised());
        }
        assert!(!signal.is_armed());
        assert!(!signal.is_raised());
    }

    #[test]
    fn intercept_ignores_ordinary_input() {
        let signal = CancelSignal::new("stop");
        let _armed = signal.arm();
        assert!(!signal.intercept("q"));
        assert!(!signal.intercept("stopper"));
        assert!(signal.intercept("STOP"));
    }

    #[test]
    fn clones_share_state() {
        let signal = CancelSignal::default();
        let listener = signal.clone();
        let _armed = signal.arm();
        listener.raise();
        assert!(signal.is_raised());
    }

    #[test]
    fn blank_token_falls_back() {
        assert_eq!(CancelSignal::new("  ").token(), DEFAULT_TOKEN);
    }
}
