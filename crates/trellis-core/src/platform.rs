//! Platform abstraction for redraw scheduling.
//!
//! Event handlers never drive layout themselves. They mutate state and ask
//! the host, through a [`FrameRequester`], to run the next layout + paint
//! pass.

use std::fmt;
use std::sync::Arc;

/// Schedules frames on behalf of the toolkit.
pub trait RuntimeScheduler {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Cloneable handle captured by event handlers to request a redraw.
#[derive(Clone, Default)]
pub struct FrameRequester {
    scheduler: Option<Arc<dyn RuntimeScheduler>>,
}

impl FrameRequester {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler: Some(scheduler),
        }
    }

    /// A requester that is not wired to any host. Requests are dropped.
    pub fn detached() -> Self {
        Self { scheduler: None }
    }

    pub fn request_frame(&self) {
        match &self.scheduler {
            Some(scheduler) => scheduler.schedule_frame(),
            None => log::trace!("frame requested on a detached requester"),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.scheduler.is_some()
    }
}

impl fmt::Debug for FrameRequester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameRequester")
            .field("attached", &self.is_attached())
            .finish()
    }
}
