use clap::{arg, command};
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;

use abi::config::{Config, LogConfig};
use abi::errors::{Error, ErrorKind};

const DEFAULT_CONFIG: &str = "./abi/fixtures/social.yml";

#[tokio::main]
async fn main() -> Result<(), Error> {
    let matches = command!()
        .arg(arg!(-c --config <FILE> "path of the yaml config").default_value(DEFAULT_CONFIG))
        .get_matches();
    let path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG);

    let config = Config::load(path)?;

    // dropping the guard stops the file writer
    let _guard = init_tracing(&config.log)?;
    info!("config loaded from {path}, store backend {:?}", config.store.backend);

    api::start(config).await
}

fn init_tracing(log: &LogConfig) -> Result<Option<WorkerGuard>, Error> {
    let level: Level = log.level.parse().map_err(|_| {
        Error::with_details(
            ErrorKind::ConfigParseError,
            format!("unknown log level {}", log.level),
        )
    })?;

    let builder = tracing_subscriber::FmtSubscriber::builder()
        .with_line_number(true)
        .with_max_level(level);

    match &log.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "social.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            builder.with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            builder.init();
            Ok(None)
        }
    }
}
