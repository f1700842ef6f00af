use engine_logging::{engine_debug, engine_info, engine_warn};
use mirror_engine::{MirrorEvent, ProgressSink};

/// Reports worker progress through the global logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn emit(&self, event: MirrorEvent) {
        match event {
            MirrorEvent::Translating { filename, .. } => {
                engine_info!("Translating {} ...", filename);
            }
            MirrorEvent::Written {
                worker,
                filename,
                path,
            } => {
                engine_debug!("[w{}] {} -> {}", worker, filename, path.display());
            }
            MirrorEvent::Skipped {
                worker,
                filename,
                reason,
            } => {
                engine_warn!("[w{}] Skipped {}: {}", worker, filename, reason);
            }
        }
    }
}
