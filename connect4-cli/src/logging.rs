use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;

/// Send logs to `path`. The game owns the terminal, so without a log file
/// there is no subscriber at all.
pub fn init(path: Option<&Path>, level: LevelFilter) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Could not open log file `{}`", path.display()))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    let subscriber = tracing_subscriber::registry::Registry::default()
        .with(level)
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber).context("setting global default failed")
}
