use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;

use encoding_rs::Encoding;
use engine_logging::{engine_debug, engine_error, engine_warn, set_worker, worker_label};
use thiserror::Error;

use crate::decode::DEFAULT_ENCODINGS;
use crate::filename::DUMP_MARKER;
use crate::page::{PageError, PageNormalizer};
use crate::paragraphs::{article_selector, ParagraphError};
use crate::persist::{check_output_dir, PersistError};
use crate::types::{MirrorEvent, MirrorSummary, PageOutcome, ProgressSink, WorkerId};

pub const DEFAULT_WORKER_COUNT: usize = 6;

#[derive(Debug, Clone)]
pub struct MirrorSettings {
    /// Number of worker threads; 1 converts the dump serially.
    pub worker_count: usize,
    /// Encodings tried in order when decoding a dumped page.
    pub encodings: Vec<&'static Encoding>,
    /// CSS selector of the article container whose paragraphs are regrouped.
    pub article_selector: String,
    /// Substring removed from source filenames to get mirror filenames.
    pub filename_marker: String,
}

impl Default for MirrorSettings {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            encodings: DEFAULT_ENCODINGS.to_vec(),
            article_selector: "#wiki".to_string(),
            filename_marker: DUMP_MARKER.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("failed to list source directory {path:?}: {source}")]
    SourceDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    OutputDir(#[from] PersistError),
    #[error(transparent)]
    Selector(#[from] ParagraphError),
    #[error("worker {worker} stopped: {source}")]
    Worker {
        worker: WorkerId,
        #[source]
        source: PageError,
    },
    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: WorkerId },
}

/// Regular files directly inside a source directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceListing {
    /// UTF-8 filenames, sorted.
    pub files: Vec<String>,
    /// Filenames that are not valid UTF-8; these are not converted.
    pub unsupported: Vec<OsString>,
}

/// Lists the regular files directly inside `dir`, sorted by name.
/// Subdirectories are skipped; names that are not valid UTF-8 are set aside.
pub fn list_source_files(dir: &Path) -> Result<SourceListing, MirrorError> {
    let source_dir_error = |source| MirrorError::SourceDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut listing = SourceListing::default();
    for entry in fs::read_dir(dir).map_err(source_dir_error)? {
        let entry = entry.map_err(source_dir_error)?;
        if entry.path().is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => listing.files.push(name),
            Err(name) => {
                engine_warn!("Skipping non UTF-8 filename {:?}", name);
                listing.unsupported.push(name);
            }
        }
    }
    listing.files.sort();
    Ok(listing)
}

/// Deals `files` round-robin into `workers` lists: file `i` goes to list `i % workers`.
/// Always returns `max(workers, 1)` lists, some possibly empty.
pub fn partition_round_robin(files: Vec<String>, workers: usize) -> Vec<Vec<String>> {
    let workers = workers.max(1);
    let mut lists = vec![Vec::new(); workers];
    for (index, file) in files.into_iter().enumerate() {
        lists[index % workers].push(file);
    }
    lists
}

/// Fixed pool of workers converting one dump directory into a mirror directory.
///
/// Each worker owns a disjoint slice of the file list, so no two workers ever
/// write the same output file. The only synchronization is the final join.
#[derive(Debug, Clone)]
pub struct MirrorPool {
    settings: MirrorSettings,
    src_dir: PathBuf,
    dest_dir: PathBuf,
}

impl MirrorPool {
    pub fn new(
        settings: MirrorSettings,
        src_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
    ) -> Result<Self, MirrorError> {
        article_selector(&settings.article_selector)?;
        Ok(Self {
            settings,
            src_dir: src_dir.into(),
            dest_dir: dest_dir.into(),
        })
    }

    pub fn settings(&self) -> &MirrorSettings {
        &self.settings
    }

    /// Converts every file of the source directory and waits for all workers.
    ///
    /// A worker stops at its first hard error while the others carry on; the
    /// first such error is returned once everyone has finished.
    pub fn run(&self, sink: &dyn ProgressSink) -> Result<MirrorSummary, MirrorError> {
        check_output_dir(&self.dest_dir)?;
        let listing = list_source_files(&self.src_dir)?;
        engine_debug!(
            "[{}] {} files across {} workers",
            worker_label(),
            listing.files.len(),
            self.settings.worker_count.max(1)
        );
        let work_lists = partition_round_robin(listing.files, self.settings.worker_count);

        let results: Vec<Result<MirrorSummary, MirrorError>> = thread::scope(|scope| {
            let handles: Vec<_> = work_lists
                .iter()
                .enumerate()
                .map(|(worker, files)| scope.spawn(move || self.run_worker(worker, files, sink)))
                .collect();

            handles
                .into_iter()
                .enumerate()
                .map(|(worker, handle)| {
                    handle
                        .join()
                        .unwrap_or(Err(MirrorError::WorkerPanicked { worker }))
                })
                .collect()
        });

        let mut summary = MirrorSummary {
            skipped: listing.unsupported.len(),
            ..MirrorSummary::default()
        };
        let mut first_error = None;
        for result in results {
            match result {
                Ok(worker_summary) => summary.merge(worker_summary),
                Err(err) => {
                    engine_error!("{}", err);
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(summary),
        }
    }

    fn run_worker(
        &self,
        worker: WorkerId,
        files: &[String],
        sink: &dyn ProgressSink,
    ) -> Result<MirrorSummary, MirrorError> {
        set_worker(worker);
        let normalizer = PageNormalizer::new(&self.settings, &self.src_dir, &self.dest_dir)?;
        let mut summary = MirrorSummary::default();

        for filename in files {
            sink.emit(MirrorEvent::Translating {
                worker,
                filename: filename.clone(),
            });
            let outcome = normalizer
                .normalize_file(filename)
                .map_err(|source| MirrorError::Worker { worker, source })?;
            summary.record(&outcome);
            let event = match outcome {
                PageOutcome::Written(path) => MirrorEvent::Written {
                    worker,
                    filename: filename.clone(),
                    path,
                },
                PageOutcome::Skipped(reason) => MirrorEvent::Skipped {
                    worker,
                    filename: filename.clone(),
                    reason,
                },
            };
            sink.emit(event);
        }

        engine_debug!(
            "[{}] finished: {} written, {} skipped",
            worker_label(),
            summary.written,
            summary.skipped
        );
        Ok(summary)
    }
}
