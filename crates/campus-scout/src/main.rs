// Copyright 2026 Campus Scout Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use campus_scout::cli;
use campus_scout::Topic;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "campus-scout",
    about = "Find institution websites and pull topic content from them",
    version
)]
struct Cli {
    /// JSON config file (overrides SCOUT_CONFIG)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Directory holding colleges.json and all_institutions.json
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank candidate official websites for an institution name
    Resolve {
        name: String,
        /// Skip the catalogs and go straight to web search
        #[arg(long)]
        force_web: bool,
        #[arg(long, default_value_t = 5)]
        max: usize,
    },
    /// Fetch topic content from an official site
    Fetch { url: String, topic: Topic },
    /// Fetch topic content from aggregator sites
    Aggregator { name: String, topic: Topic },
    /// Render a homepage once and return its text
    Snapshot { url: String },
    /// Visit the common pages of a site
    Survey { url: String },
    /// Official content plus aggregator fallback
    Gather {
        name: String,
        url: String,
        topic: Topic,
        /// Always query the aggregators, even when the official page is adequate
        #[arg(long)]
        always_merge: bool,
    },
    /// Route a question to topics
    Detect { question: String },
    /// Check the environment
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_tracing(cli.verbose, cli.log_json)?;

    let opts = cli::GlobalOpts {
        config: cli.config,
        data_dir: cli.data_dir,
    };

    let result = match cli.command {
        Commands::Resolve {
            name,
            force_web,
            max,
        } => cli::commands::resolve(&opts, &name, force_web, max).await,
        Commands::Fetch { url, topic } => cli::commands::fetch(&opts, &url, topic).await,
        Commands::Aggregator { name, topic } => {
            cli::commands::aggregator(&opts, &name, topic).await
        }
        Commands::Snapshot { url } => cli::commands::snapshot(&opts, &url).await,
        Commands::Survey { url } => cli::commands::survey(&opts, &url).await,
        Commands::Gather {
            name,
            url,
            topic,
            always_merge,
        } => cli::commands::gather(&opts, &name, &url, topic, always_merge).await,
        Commands::Detect { question } => cli::commands::detect(&question),
        Commands::Doctor => cli::doctor::run(&opts).await,
    };

    if let Err(e) = result {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}
