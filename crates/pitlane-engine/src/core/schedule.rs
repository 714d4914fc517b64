use crate::api::types::{ElementId, ScrollMode};

/// Work that must wait until the host has rendered once.
///
/// Layout changes made during an event (closing the menu, for instance) are
/// only reflected in measurements after the next frame, so anything that
/// measures goes through here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Measure the header and scroll to `target`.
    ScrollTo { target: ElementId, mode: ScrollMode },
}

/// State of the single long-lived repeating task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Repeating {
    #[default]
    Stopped,
    Running,
}

/// What a frame should run, in order: deferred tasks, then the repeating tick.
#[derive(Debug, Default)]
pub struct FrameWork {
    pub deferred: Vec<DeferredTask>,
    pub tick: bool,
}

/// Frame-level scheduling: one-shot post-layout tasks plus one repeating task.
///
/// At most one host frame is outstanding at any time. `request` flips the
/// pending latch and tells the caller whether the host must be asked;
/// `begin_frame` clears it.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    deferred: Vec<DeferredTask>,
    repeating: Repeating,
    frame_pending: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task for the next frame.
    pub fn defer(&mut self, task: DeferredTask) {
        self.deferred.push(task);
    }

    /// Start the repeating task. Returns false if it was already running.
    pub fn start_repeating(&mut self) -> bool {
        if self.repeating == Repeating::Running {
            return false;
        }
        self.repeating = Repeating::Running;
        true
    }

    /// Stop the repeating task. Returns false if it was already stopped.
    pub fn stop_repeating(&mut self) -> bool {
        if self.repeating == Repeating::Stopped {
            return false;
        }
        self.repeating = Repeating::Stopped;
        true
    }

    pub fn is_repeating(&self) -> bool {
        self.repeating == Repeating::Running
    }

    /// Whether anything wants a frame.
    pub fn has_work(&self) -> bool {
        !self.deferred.is_empty() || self.is_repeating()
    }

    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    /// Returns true when a new host frame must be requested.
    pub fn request(&mut self) -> bool {
        if self.frame_pending || !self.has_work() {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Returns true when the outstanding host frame should be cancelled
    /// because nothing needs it anymore.
    pub fn cancel(&mut self) -> bool {
        if !self.frame_pending || self.has_work() {
            return false;
        }
        self.frame_pending = false;
        true
    }

    /// Take this frame's work. Tasks deferred while it runs land in the next frame.
    pub fn begin_frame(&mut self) -> FrameWork {
        self.frame_pending = false;
        FrameWork {
            deferred: std::mem::take(&mut self.deferred),
            tick: self.is_repeating(),
        }
    }
}
