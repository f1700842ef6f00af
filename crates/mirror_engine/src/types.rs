use std::fmt;
use std::path::PathBuf;

pub type WorkerId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorEvent {
    Translating {
        worker: WorkerId,
        filename: String,
    },
    Written {
        worker: WorkerId,
        filename: String,
        path: PathBuf,
    },
    Skipped {
        worker: WorkerId,
        filename: String,
        reason: SkipReason,
    },
}

/// Receives progress from the worker threads. Implementations must tolerate
/// concurrent calls from every worker.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: MirrorEvent);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Undecodable { tried: Vec<String> },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Undecodable { tried } => {
                write!(f, "not decodable as {}", tried.join(" or "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Written(PathBuf),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorSummary {
    pub written: usize,
    pub skipped: usize,
}

impl MirrorSummary {
    pub fn record(&mut self, outcome: &PageOutcome) {
        match outcome {
            PageOutcome::Written(_) => self.written += 1,
            PageOutcome::Skipped(_) => self.skipped += 1,
        }
    }

    pub fn merge(&mut self, other: MirrorSummary) {
        self.written += other.written;
        self.skipped += other.skipped;
    }

    pub fn total(&self) -> usize {
        self.written + self.skipped
    }
}
