use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod onboarding;
mod output;
mod pipeline;
mod progress;
mod render;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("geoscope error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let session = bootstrap::load(&cli.credentials())?;
    let Some(client) = session.client() else {
        println!("{}", onboarding::render());
        anyhow::bail!("no Rankscale API key configured");
    };

    if cli.discover_brands {
        return commands::discover::handle(&client, &flags).await;
    }

    commands::report::handle(&client, &session.credentials, cli.blocks(), &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("GEOSCOPE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
