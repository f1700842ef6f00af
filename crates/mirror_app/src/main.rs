mod logging;
mod progress;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use engine_logging::engine_info;
use mirror_engine::{MirrorPool, MirrorSettings};

use crate::progress::LogProgressSink;

#[derive(Debug, Parser)]
#[command(
    name = "wiki-mirror",
    version,
    about = "Convert a c2 wiki page dump into a statically servable mirror"
)]
struct Cli {
    /// Directory holding the dumped `wiki?<Page>.html` files.
    #[arg(value_name = "SOURCE_DIR")]
    source: PathBuf,
    /// Existing directory the cleaned pages are written to.
    #[arg(value_name = "DEST_DIR")]
    dest: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize();

    let pool = MirrorPool::new(MirrorSettings::default(), &cli.source, &cli.dest)
        .context("invalid mirror settings")?;
    engine_info!(
        "Mirroring {} into {} with {} workers",
        cli.source.display(),
        cli.dest.display(),
        pool.settings().worker_count
    );

    let summary = pool.run(&LogProgressSink).with_context(|| {
        format!(
            "failed to mirror {} into {}",
            cli.source.display(),
            cli.dest.display()
        )
    })?;

    engine_info!(
        "Done: {} pages written, {} skipped",
        summary.written,
        summary.skipped
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_takes_two_positional_dirs() {
        let cli = Cli::try_parse_from(["wiki-mirror", "dump", "mirror"]).unwrap();
        assert_eq!(cli.source.to_str(), Some("dump"));
        assert_eq!(cli.dest.to_str(), Some("mirror"));

        assert!(Cli::try_parse_from(["wiki-mirror", "dump"]).is_err());
        assert!(Cli::try_parse_from(["wiki-mirror", "a", "b", "c"]).is_err());
    }
}
