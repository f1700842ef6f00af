//! Mirror engine: turns a c2 wiki page dump into a statically servable mirror.
mod decode;
mod engine;
mod filename;
mod links;
mod page;
mod paragraphs;
mod persist;
mod sanitize;
mod types;

pub use decode::{
    decode_html, decode_with_candidates, DecodeError, DecodedHtml, DEFAULT_ENCODINGS,
};
pub use engine::{
    list_source_files, partition_round_robin, MirrorError, MirrorPool, MirrorSettings,
    SourceListing, DEFAULT_WORKER_COUNT,
};
pub use filename::{mirror_filename, page_name, DUMP_MARKER};
pub use links::{
    map_url, rewrite_document_links, RewriteRule, UrlAction, UrlPattern, REWRITE_RULES,
    URL_ATTRIBUTES,
};
pub use page::{normalize_html, PageError, PageNormalizer};
pub use paragraphs::{
    article_selector, classify, regroup, regroup_article, Block, ChildKind, ParagraphError,
};
pub use persist::{check_output_dir, AtomicFileWriter, PersistError};
pub use sanitize::{make_printable, strip_scripts};
pub use types::{MirrorEvent, MirrorSummary, PageOutcome, ProgressSink, SkipReason, WorkerId};
