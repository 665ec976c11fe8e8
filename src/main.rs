use anyhow::Context;
use bikeshare_explorer::config::ExplorerConfig;
use bikeshare_explorer::console::Console;
use bikeshare_explorer::explore;
use bikeshare_explorer::ingestion::LogObserver;
use bikeshare_explorer::resolver::Catalogs;
use bikeshare_explorer::ExplorerError;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; set RUST_LOG=debug to trace resolution and loading.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = ExplorerConfig::from_env().context("reading configuration")?;
    let catalogs = Catalogs::standard().context("building prompt catalogs")?;
    let mut console = Console::stdio();

    match explore::run(&mut console, &catalogs, &config, &LogObserver) {
        Ok(()) | Err(ExplorerError::InputClosed) => Ok(()),
        Err(err) => Err(err).context("bikeshare session aborted"),
    }
}
