mod card;
mod query;
mod tmdb;

pub const USER_AGENT: &str = concat!("moviecard/", env!("CARGO_PKG_VERSION"));

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

use query::{MovieRecord, QueryStatus, query_movie_data_from_title};
use tmdb::{DEFAULT_LANGUAGE, TmdbClient};

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering DNS + connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Look up movies on TMDb and print one JSON record per title.
///
/// Requires `TMDB_API_KEY` in the environment.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Movie titles to resolve, in order
    #[arg(default_value = "Joker")]
    titles: Vec<String>,

    /// Locale for every TMDb request
    #[arg(long, env = "TMDB_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    language: String,
}

#[derive(Serialize)]
struct Output<'a> {
    card: Option<&'a MovieRecord>,
    status: &'a QueryStatus,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("moviecard=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()?;
    let client = TmdbClient::from_env(http, &cli.language)
        .inspect_err(|e| error!("TMDb client not available: {e}"))?;

    info!(titles = cli.titles.len(), language = client.language(), "starting lookups");

    let mut stdout = std::io::stdout().lock();
    for title in &cli.titles {
        let (record, status) = query_movie_data_from_title(&client, title)
            .await
            .inspect_err(|e| error!(%title, "lookup failed: {e}"))?;
        let output = Output {
            card: record.as_ref(),
            status: &status,
        };
        serde_json::to_writer(&mut stdout, &output)?;
        writeln!(stdout)?;
    }

    info!("done");
    Ok(())
}
