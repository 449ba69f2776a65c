use abby::{Error, config::Config};
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv().ok();

    // Debug level for our crate, warnings for everything else
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("abby=debug,warn")),
        )
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_target(true)
        .with_ansi(true)
        .pretty()
        .init();

    let config = Config::from_env()?;

    info!("Starting Abby");
    match abby::run(config).await {
        Ok(()) => {
            info!("Abby shut down successfully");
            Ok(())
        }
        Err(e) => {
            error!("Abby encountered an error: {}", e);
            Err(e)
        }
    }
}
