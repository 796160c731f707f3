//! Command-line entrypoint: replay edits and print the resulting history.

use clap::Parser;
use textlog::config::Config;
use textlog::constants::DEFAULT_LOG_FILTER;
use textlog::script::{run_script, EditOp, Report};
use textlog::History;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "textlog",
    about = "Replay text edits and show the versioned history",
    version
)]
struct Cli {
    /// Print the report as JSON (also enabled by TEXTLOG_JSON).
    #[arg(long)]
    json: bool,

    /// Show every recorded action instead of merging neighbours.
    #[arg(long)]
    no_merge: bool,

    /// First version of the reported range (inclusive).
    #[arg(long)]
    from: Option<u64>,

    /// End of the reported range (exclusive); defaults to the final version.
    #[arg(long)]
    to: Option<u64>,

    /// Edits to apply in order: insert:TEXT[@POS], replace:TEXT[@POS],
    /// delete:POS:LEN or demo.
    #[arg(required = true)]
    edits: Vec<EditOp>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if cli.no_merge {
        config.history.merge_actions = false;
    }
    if cli.json {
        config.json_output = true;
    }

    let mut history = History::with_config(config.history);
    run_script(&mut history, &cli.edits)?;
    tracing::info!(
        "Applied {} edit step(s); history at version {}",
        cli.edits.len(),
        history.version()
    );

    let report = Report::collect(&history, cli.from, cli.to)?;
    if config.json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
