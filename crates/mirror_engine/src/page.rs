use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use engine_logging::{engine_debug, worker_label};
use scraper::{Html, Selector};
use thiserror::Error;

use crate::decode::{decode_with_candidates, DecodeError};
use crate::engine::MirrorSettings;
use crate::filename::{mirror_filename, page_name};
use crate::links::rewrite_document_links;
use crate::paragraphs::{article_selector, regroup_article, ParagraphError};
use crate::persist::{AtomicFileWriter, PersistError};
use crate::sanitize::{make_printable, strip_scripts};
use crate::types::{PageOutcome, SkipReason};

#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{filename}: {source}")]
    Structure {
        filename: String,
        #[source]
        source: ParagraphError,
    },
    #[error("failed to write mirror of {filename}: {source}")]
    Persist {
        filename: String,
        #[source]
        source: PersistError,
    },
}

/// Cleans one dumped page held in memory and returns the mirror HTML.
///
/// Scripts are stripped, c2 URLs are rewritten relative to `page`, the article
/// matched by `selector` is regrouped into paragraphs and control characters
/// are removed from the serialized result.
pub fn normalize_html(
    html: &str,
    page: &str,
    selector: &Selector,
) -> Result<String, ParagraphError> {
    let mut doc = Html::parse_document(html);
    let scripts = strip_scripts(&mut doc);
    let links = rewrite_document_links(&mut doc, page);
    let paragraphs = regroup_article(&mut doc, selector)?;
    engine_debug!(
        "[{}] {}: removed {} scripts, rewrote {} links, built {} paragraphs",
        worker_label(),
        page,
        scripts,
        links,
        paragraphs
    );
    Ok(make_printable(&doc.html()))
}

/// Per-worker pipeline from a dumped file to its mirror file.
pub struct PageNormalizer {
    src_dir: PathBuf,
    writer: AtomicFileWriter,
    selector: Selector,
    encodings: Vec<&'static Encoding>,
    marker: String,
}

impl PageNormalizer {
    pub fn new(
        settings: &MirrorSettings,
        src_dir: &Path,
        dest_dir: &Path,
    ) -> Result<Self, ParagraphError> {
        Ok(Self {
            src_dir: src_dir.to_path_buf(),
            writer: AtomicFileWriter::new(dest_dir.to_path_buf()),
            selector: article_selector(&settings.article_selector)?,
            encodings: settings.encodings.clone(),
            marker: settings.filename_marker.clone(),
        })
    }

    /// Converts `filename` from the source directory into the destination directory.
    ///
    /// A file that no candidate encoding accepts is skipped without output.
    pub fn normalize_file(&self, filename: &str) -> Result<PageOutcome, PageError> {
        let path = self.src_dir.join(filename);
        let bytes = fs::read(&path).map_err(|source| PageError::Read {
            path: path.clone(),
            source,
        })?;

        let decoded = match decode_with_candidates(&bytes, &self.encodings) {
            Ok(decoded) => decoded,
            Err(DecodeError::Undecodable { tried }) => {
                engine_debug!("[{}] skipping undecodable {}", worker_label(), filename);
                return Ok(PageOutcome::Skipped(SkipReason::Undecodable { tried }));
            }
        };
        engine_debug!(
            "[{}] decoded {} as {}",
            worker_label(),
            filename,
            decoded.encoding_label
        );

        let page = page_name(filename, &self.marker);
        let html = normalize_html(&decoded.html, &page, &self.selector).map_err(|source| {
            PageError::Structure {
                filename: filename.to_string(),
                source,
            }
        })?;

        let target = mirror_filename(filename, &self.marker);
        let written = self
            .writer
            .write(&target, &html)
            .map_err(|source| PageError::Persist {
                filename: filename.to_string(),
                source,
            })?;
        Ok(PageOutcome::Written(written))
    }
}
