use std::path::PathBuf;

use clap::{
    ArgAction, CommandFactory, Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use weekly_releases::{cli, config, error, utils};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Spotify access token with the user-follow-read, user-library-read and
    /// playlist-modify-private scopes
    #[clap(required_unless_present = "completions")]
    token: Option<String>,

    /// Print the recent releases instead of creating a playlist
    #[clap(long)]
    dry_run: bool,

    /// Release type(s) to include; can be repeated
    #[clap(
        long = "type",
        default_value = "album,single",
        value_parser = utils::parse_release_kinds,
        action = ArgAction::Append,
        num_args = 1
    )]
    release_types: Vec<utils::ReleaseKinds>,

    /// Name of the created playlist [default: "Weekly Releases - <today>"]
    #[clap(long)]
    name: Option<String>,

    /// Directory of the response cache
    #[clap(long)]
    cache_dir: Option<PathBuf>,

    /// Print shell completions and exit
    #[clap(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

/// Merges repeated `--type` values into one set.
fn merge_release_kinds(values: Vec<utils::ReleaseKinds>) -> utils::ReleaseKinds {
    let mut merged = utils::ReleaseKinds(Default::default());
    for kinds in values {
        merged.0.extend(kinds.0);
    }

    if merged.0.is_empty() {
        return utils::ReleaseKinds::default();
    }
    merged
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let Some(token) = cli.token else {
        error!("An access token is required");
    };
    let release_kinds = merge_release_kinds(cli.release_types);

    if cli.dry_run {
        cli::list_releases(&token, &release_kinds, cli.cache_dir).await;
    } else {
        cli::playlist(&token, &release_kinds, cli.name, cli.cache_dir).await;
    }
}
