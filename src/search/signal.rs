//! Cooperative stop signal shared between a caller and a search thread

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// One-shot stop flag.
///
/// The search polls [`StopSignal::is_raised`] between sibling moves; the
/// worker sleeps in [`StopSignal::wait_timeout`] during its pacing delay and
/// wakes as soon as the flag is raised.
#[derive(Debug, Default)]
pub struct StopSignal {
    raised: AtomicBool,
    gate: Mutex<()>,
    cvar: Condvar,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// Raise the flag and wake any waiter
    pub fn raise(&self) {
        // Store under the gate so a waiter cannot miss the wakeup between
        // its check and its wait.
        let _guard = self.gate.lock().unwrap_or_else(|e| e.into_inner());
        self.raised.store(true, Ordering::Release);
        self.cvar.notify_all();
    }

    /// Lower the flag before the next search
    pub fn clear(&self) {
        self.raised.store(false, Ordering::Release);
    }

    /// Block until `timeout` elapses or the flag is raised.
    ///
    /// Returns `true` if woken by the flag.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut guard = self.gate.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            if self.is_raised() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            guard = match self.cvar.wait_timeout(guard, deadline - now) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
    }
}
