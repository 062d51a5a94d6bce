//! Standard runtime services backed by Rust's `std` library.
//!
//! This crate provides the concrete implementation of the scheduling trait
//! defined in `trellis-core`. An application shell constructs a
//! [`StdRuntime`], hands its [`FrameRequester`] to the layout context so
//! event handlers can ask for a redraw, and polls
//! [`StdRuntime::take_frame_request`] to decide when to run the next pass.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use trellis_core::{FrameRequester, RuntimeScheduler};

/// Scheduler that records frame requests in an atomic flag.
pub struct StdScheduler {
    frame_requested: AtomicBool,
    requests: AtomicU64,
    frame_waker: RwLock<Option<Arc<dyn Fn() + Send + Sync + 'static>>>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self {
            frame_requested: AtomicBool::new(false),
            requests: AtomicU64::new(0),
            frame_waker: RwLock::new(None),
        }
    }

    /// Returns whether a frame has been requested since the last call.
    pub fn take_frame_request(&self) -> bool {
        self.frame_requested.swap(false, Ordering::SeqCst)
    }

    /// Total number of frame requests received.
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }

    /// Registers a waker invoked when a frame becomes pending. Further requests
    /// before the next [`StdScheduler::take_frame_request`] do not wake again.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        match self.frame_waker.write() {
            Ok(mut slot) => *slot = Some(Arc::new(waker)),
            Err(_) => log::error!("frame waker lock poisoned; waker not installed"),
        }
    }

    /// Clears any registered frame waker.
    pub fn clear_frame_waker(&self) {
        if let Ok(mut slot) = self.frame_waker.write() {
            *slot = None;
        }
    }

    fn wake(&self) {
        let waker = match self.frame_waker.read() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        };
        if let Some(waker) = waker {
            waker();
        }
    }
}

impl Default for StdScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field(
                "frame_requested",
                &self.frame_requested.load(Ordering::SeqCst),
            )
            .field("requests", &self.request_count())
            .finish()
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if !self.frame_requested.swap(true, Ordering::SeqCst) {
            self.wake();
        }
    }
}

/// Convenience container around the standard scheduler.
#[derive(Clone)]
pub struct StdRuntime {
    scheduler: Arc<StdScheduler>,
}

impl StdRuntime {
    /// Creates a new standard runtime instance.
    pub fn new() -> Self {
        Self {
            scheduler: Arc::new(StdScheduler::default()),
        }
    }

    /// Returns a requester wired to this runtime's scheduler.
    pub fn frame_requester(&self) -> FrameRequester {
        FrameRequester::new(self.scheduler.clone())
    }

    /// Returns the scheduler implementation.
    pub fn scheduler(&self) -> Arc<StdScheduler> {
        Arc::clone(&self.scheduler)
    }

    /// Returns whether a frame was requested since the last poll.
    pub fn take_frame_request(&self) -> bool {
        self.scheduler.take_frame_request()
    }

    /// Registers a waker to be called when a new frame is requested.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.scheduler.set_frame_waker(waker);
    }

    /// Clears any previously registered frame waker.
    pub fn clear_frame_waker(&self) {
        self.scheduler.clear_frame_waker();
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::StdRuntime;

    #[test]
    fn requester_sets_the_frame_flag_once() {
        let runtime = StdRuntime::new();
        let requester = runtime.frame_requester();
        assert!(!runtime.take_frame_request());

        requester.request_frame();
        requester.clone().request_frame();

        assert!(runtime.take_frame_request());
        assert!(!runtime.take_frame_request(), "flag resets after take");
        assert_eq!(runtime.scheduler().request_count(), 2);
    }

    #[test]
    fn waker_runs_once_per_pending_frame() {
        let runtime = StdRuntime::new();
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&wakes);
        runtime.set_frame_waker(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        runtime.frame_requester().request_frame();
        runtime.frame_requester().request_frame();
        assert_eq!(wakes.load(Ordering::SeqCst), 1);

        assert!(runtime.take_frame_request());
        runtime.frame_requester().request_frame();
        assert_eq!(wakes.load(Ordering::SeqCst), 2);

        assert!(runtime.take_frame_request());
        runtime.clear_frame_waker();
        runtime.frame_requester().request_frame();
        assert_eq!(wakes.load(Ordering::SeqCst), 2);
    }
}
