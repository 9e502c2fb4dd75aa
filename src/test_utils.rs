#[cfg(test)]
pub mod test_utils {
    use std::path::Path;

    use clap::Parser;
    use engine::OverflowPolicy;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use crate::cli::Cli;
    use crate::config::AppConfig;

    /// Configuration writing into `dir`, with no feed latency.
    pub fn setup_test_config(dir: &Path) -> AppConfig {
        AppConfig {
            storage_path: dir.join("store.json"),
            catalog_path: None,
            columns: 12,
            overflow: OverflowPolicy::NextRow,
            autosave_layout: false,
            log_filter: "warn".to_string(),
            feed_latency_ms: 0,
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level comes from RUST_LOG, defaulting to WARN.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Runs one CLI invocation and returns what it printed.
    pub async fn run_cli(config: &AppConfig, args: &[&str]) -> anyhow::Result<String> {
        let _guard = init_test_tracing();
        let cli = Cli::try_parse_from(std::iter::once("bankboard").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        cli.run(config, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }
}
