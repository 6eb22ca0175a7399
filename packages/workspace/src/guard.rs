//! Single-flight submission and refresh sequencing.

use std::cell::Cell;
use std::fmt;

/// Admits at most one submission at a time.
///
/// A successful [`Self::try_acquire`] returns a [`SubmitGuard`]; the latch
/// stays closed until that guard is dropped. Dropping happens on every exit
/// path of the owning future, including cancellation and unwinding, so the
/// latch can never be left closed.
#[derive(Debug, Default)]
pub struct SubmitLatch {
    busy: Cell<bool>,
}

impl SubmitLatch {
    /// Creates an open latch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            busy: Cell::new(false),
        }
    }

    /// Whether a guard is currently held.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Closes the latch, or returns `None` if it is already closed.
    ///
    /// `on_release` runs once, after the latch reopens, when the returned
    /// guard is dropped.
    pub fn try_acquire<'a>(&'a self, on_release: impl FnOnce() + 'a) -> Option<SubmitGuard<'a>> {
        if self.busy.replace(true) {
            return None;
        }
        Some(SubmitGuard {
            latch: self,
            on_release: Some(Box::new(on_release)),
        })
    }
}

/// Proof that a submission is in flight. Reopens its latch on drop.
pub struct SubmitGuard<'a> {
    latch: &'a SubmitLatch,
    on_release: Option<Box<dyn FnOnce() + 'a>>,
}

impl fmt::Debug for SubmitGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitGuard").finish_non_exhaustive()
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.latch.busy.set(false);
        if let Some(on_release) = self.on_release.take() {
            on_release();
        }
    }
}

/// Identifies one history refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshToken(u64);

/// Orders overlapping history refreshes.
///
/// Each refresh takes a token before it fetches. Only the holder of the most
/// recently issued token may apply its result; anything older was
/// superseded while it was waiting.
#[derive(Debug, Default)]
pub struct RefreshSequencer {
    issued: Cell<u64>,
}

impl RefreshSequencer {
    /// Creates a sequencer that has issued nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            issued: Cell::new(0),
        }
    }

    /// Issues a token newer than every previous one.
    pub fn issue(&self) -> RefreshToken {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        RefreshToken(next)
    }

    /// Whether `token` is the newest issued.
    #[must_use]
    pub fn is_current(&self, token: RefreshToken) -> bool {
        self.issued.get() == token.0
    }
}
