//! CLI command implementations

use std::process::ExitCode;

use anyhow::Context;
use clap::Subcommand;
use marquee_core::{MarqueeConfig, MarqueeError, RuntimeMode};
use marquee_search::{
    MovieRecord, MovieResolver, PosterSettings, Snapshot, provider_for_mode,
};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Look up a movie and print its details
    Search {
        /// Title to search for
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Use the offline demo catalogue
        #[arg(long)]
        demo: bool,
        /// Print the resulting view state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start the web server
    Server {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
        /// Use the offline demo catalogue
        #[arg(long)]
        demo: bool,
    },
}

/// Handle the CLI command
///
/// # Errors
/// - `MarqueeError::Configuration` - Missing API key or invalid overrides
/// - `MarqueeError::Io` - Server failed to bind
pub async fn handle_command(command: Commands, api_key: Option<String>) -> anyhow::Result<ExitCode> {
    let config = MarqueeConfig::from_env()
        .map_err(MarqueeError::from)?
        .with_api_key(api_key);

    match command {
        Commands::Search { query, demo, json } => {
            search(config, &query.join(" "), RuntimeMode::from_demo_flag(demo), json).await
        }
        Commands::Server { host, port, demo } => {
            start_server(config, host, port, RuntimeMode::from_demo_flag(demo)).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Run one lookup and print the outcome
///
/// Exits non-zero when the lookup ended in an error message.
///
/// # Errors
/// - `MarqueeError::Configuration` - Missing API key in live mode
pub async fn search(
    config: MarqueeConfig,
    query: &str,
    mode: RuntimeMode,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let provider = provider_for_mode(mode, &config).map_err(MarqueeError::from)?;
    let resolver = MovieResolver::new(provider, PosterSettings::from(&config.tmdb));

    let outcome = resolver.resolve(query).await;
    tracing::debug!(?outcome, %mode, "Search command finished");

    let snapshot = resolver.snapshot();
    if json {
        let rendered =
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize view state")?;
        println!("{rendered}");
    } else {
        let rendered = render_text(&snapshot);
        if !rendered.is_empty() {
            println!("{rendered}");
        }
    }

    if snapshot.content().alert.is_some() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Start the web server for the search page and API access
///
/// # Errors
/// - `MarqueeError::Configuration` - Missing API key in live mode
/// - `MarqueeError::Io` - Failed to bind to the specified address
pub async fn start_server(
    mut config: MarqueeConfig,
    host: Option<String>,
    port: Option<u16>,
    mode: RuntimeMode,
) -> Result<(), MarqueeError> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    println!("Starting Marquee web server...");
    println!("Mode: {mode}");
    println!("URL: http://{}", config.server.bind_address());
    println!("{:-<50}", "");
    println!("Press Ctrl+C to stop the server");

    marquee_web::run_server(config, mode).await
}

/// Plain-text rendering of the view for terminal output.
pub fn render_text(snapshot: &Snapshot) -> String {
    let content = snapshot.content();
    let mut sections = Vec::new();
    if let Some(message) = content.alert {
        sections.push(format!("Error: {message}"));
    }
    if let Some(record) = content.movie {
        sections.push(render_record(record));
    }
    sections.join("\n\n")
}

fn render_record(record: &MovieRecord) -> String {
    let mut lines = vec![
        format!(
            "{} ({})  ★ {}",
            record.title,
            record.year_label(),
            record.rating
        ),
        format!("{:-<60}", ""),
    ];
    if !record.plot.is_empty() {
        lines.push(record.plot.clone());
        lines.push(String::new());
    }
    lines.push(format!("Genres:   {}", record.genres.join(", ")));
    lines.push(format!("Director: {}", record.director));
    lines.push(format!("Cast:     {}", record.cast));
    lines.push(format!("Poster:   {}", record.poster));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inception() -> MovieRecord {
        MovieRecord {
            title: "Inception".to_string(),
            plot: "A thief who steals corporate secrets.".to_string(),
            rating: "8.4".to_string(),
            genres: vec!["Action".to_string(), "Science Fiction".to_string()],
            year: Some(2010),
            poster: "https://image.tmdb.org/t/p/w500/abc.jpg".to_string(),
            director: "Christopher Nolan".to_string(),
            cast: "Leonardo DiCaprio, Joseph Gordon-Levitt".to_string(),
        }
    }

    #[test]
    fn test_render_text_for_record() {
        let snapshot = Snapshot {
            record: Some(inception()),
            ..Snapshot::default()
        };

        let text = render_text(&snapshot);

        assert!(text.starts_with("Inception (2010)  ★ 8.4"));
        assert!(text.contains("Genres:   Action, Science Fiction"));
        assert!(text.contains("Director: Christopher Nolan"));
        assert!(text.contains("Poster:   https://image.tmdb.org/t/p/w500/abc.jpg"));
    }

    #[test]
    fn test_render_text_shows_error_above_kept_record() {
        let snapshot = Snapshot {
            error: Some("An error occurred while searching. Please try again.".to_string()),
            record: Some(inception()),
            ..Snapshot::default()
        };

        let text = render_text(&snapshot);

        assert!(text.starts_with("Error: An error occurred while searching."));
        assert!(text.contains("\n\nInception (2010)"));
    }

    #[test]
    fn test_render_text_error_only() {
        let snapshot = Snapshot {
            error: Some("No results found".to_string()),
            ..Snapshot::default()
        };

        assert_eq!(render_text(&snapshot), "Error: No results found");
    }

    #[test]
    fn test_render_text_unknown_year() {
        let mut record = inception();
        record.year = None;
        record.plot = String::new();
        let snapshot = Snapshot {
            record: Some(record),
            ..Snapshot::default()
        };

        let text = render_text(&snapshot);

        assert!(text.starts_with("Inception (NaN)"));
        assert!(!text.contains("\n\n"));
    }

    #[test]
    fn test_render_text_empty_view() {
        assert_eq!(render_text(&Snapshot::default()), "");
    }

    #[tokio::test]
    async fn test_demo_search_succeeds() {
        let code = search(MarqueeConfig::default(), "inception", RuntimeMode::Demo, false)
            .await
            .unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[tokio::test]
    async fn test_demo_search_without_match_fails() {
        let code = search(MarqueeConfig::default(), "Plan 10", RuntimeMode::Demo, true)
            .await
            .unwrap();

        assert_eq!(code, ExitCode::FAILURE);
    }

    #[tokio::test]
    async fn test_live_search_without_key_is_configuration_error() {
        let err = search(MarqueeConfig::default(), "inception", RuntimeMode::Live, false)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<MarqueeError>(),
            Some(MarqueeError::Configuration(_))
        ));
    }
}
