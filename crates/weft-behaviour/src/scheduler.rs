//! Repaint Scheduler
//!
//! Defers committing accepted artifacts to the next animation-frame
//! boundary so rapid attribute churn collapses into one visual update.
//!
//! `FrameClock` is the process-wide scheduling primitive (the embedder's
//! animation-frame loop); `RepaintScheduler` is the per-instance slot: at
//! most one job outstanding, a newer accepted artifact replaces the pending
//! one instead of queuing behind it, and teardown cancels the job
//! unconditionally. Jobs are demand-scheduled - nothing runs while no
//! commit is pending.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use weft_dom::Fragment;

/// Handle of one scheduled animation-frame job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(u64);

#[derive(Debug, Default)]
struct ClockInner {
    next_id: u64,
    active: HashSet<u64>,
}

/// Process-wide animation-frame primitive.
///
/// Inert infrastructure: it only issues and retires job handles. Cloning
/// shares the same clock. Single-threaded by design.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    inner: Rc<RefCell<ClockInner>>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a job for the next frame tick
    pub fn request(&self) -> FrameRequest {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.active.insert(id);
        FrameRequest(id)
    }

    /// Cancel a scheduled job; cancelling an already-retired job is a no-op
    pub fn cancel(&self, request: FrameRequest) {
        self.inner.borrow_mut().active.remove(&request.0);
    }

    /// Retire a job at its frame tick. Returns false if it was cancelled.
    pub fn complete(&self, request: FrameRequest) -> bool {
        self.inner.borrow_mut().active.remove(&request.0)
    }

    /// Whether a job is still scheduled
    pub fn is_scheduled(&self, request: FrameRequest) -> bool {
        self.inner.borrow().active.contains(&request.0)
    }

    /// Number of jobs currently scheduled across all instances
    pub fn scheduled_count(&self) -> usize {
        self.inner.borrow().active.len()
    }
}

/// Per-instance repaint slot: pending artifact + outstanding job handle
#[derive(Debug)]
pub struct RepaintScheduler {
    clock: FrameClock,
    job: Option<FrameRequest>,
    pending: Option<Fragment>,
}

impl RepaintScheduler {
    pub fn new(clock: FrameClock) -> Self {
        Self {
            clock,
            job: None,
            pending: None,
        }
    }

    /// Accept an artifact for commit at the next frame tick. Replaces any
    /// artifact already pending; schedules a job only if none is
    /// outstanding.
    pub fn submit(&mut self, artifact: Fragment) {
        let superseded = self.pending.replace(artifact).is_some();
        if self.job.is_none() {
            self.job = Some(self.clock.request());
            tracing::trace!(target: "weft::scheduler", "repaint job scheduled");
        } else if superseded {
            tracing::trace!(target: "weft::scheduler", "pending artifact superseded");
        }
    }

    /// Atomically take the pending artifact at the frame tick, retiring the
    /// job handle. Returns None when nothing is pending or the job was
    /// cancelled.
    pub fn take_commit(&mut self) -> Option<Fragment> {
        let job = self.job.take()?;
        if !self.clock.complete(job) {
            self.pending = None;
            return None;
        }
        self.pending.take()
    }

    /// Cancel the outstanding job and drop the pending artifact
    pub fn cancel(&mut self) {
        if let Some(job) = self.job.take() {
            self.clock.cancel(job);
            tracing::trace!(target: "weft::scheduler", "repaint job cancelled");
        }
        self.pending = None;
    }

    /// Whether a commit is pending
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
