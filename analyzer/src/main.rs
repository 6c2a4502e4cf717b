use anyhow::Context;
use bridge::model::PanelModel;
use bridge::panel::PanelBridge;
use clap::Parser;
use feed::profile::{DetectionFeed, FeedConfig, SyntheticFeed};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use trafficcore::control::OverrideController;
use trafficcore::journal::DecisionJournal;
use trafficcore::resolver::Provenance;
use workflow::client::HttpDecisionBackend;
use workflow::config::AnalyzerConfig;
use workflow::runner::Runner;

mod bridge;
mod feed;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Client-side traffic analysis and signal timing driver")]
struct Args {
    /// Run the synthetic detection feed through decision cycles and emit a summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load an analyzer config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Decision service endpoint
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,
    /// Append-only decision log path
    #[arg(long)]
    journal: Option<PathBuf>,
    #[arg(long, default_value_t = 120)]
    frames: u64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Activate the emergency override before the run
    #[arg(long, default_value_t = false)]
    emergency: bool,
    /// Keep the panel bridge alive for incoming observations
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = args.workflow {
        AnalyzerConfig::load(path)?
    } else {
        AnalyzerConfig::from_args(args.endpoint, args.timeout_secs, args.journal)
    };

    let overrides = OverrideController::new();
    if args.emergency {
        overrides.activate();
    }

    let backend = HttpDecisionBackend::new(
        &config.decision_endpoint,
        Duration::from_secs(config.request_timeout_secs),
    )
    .context("building the decision service client")?;
    let journal = DecisionJournal::open(&config.journal_path)
        .with_context(|| format!("opening journal {}", config.journal_path.display()))?;

    let runner = Arc::new(Runner::new(
        Box::new(backend),
        overrides,
        journal,
        config.policy.clone(),
    ));
    let panel_bridge = PanelBridge::new(runner.clone());

    if args.offline {
        let feed_config = FeedConfig {
            frames: args.frames,
            seed: args.seed,
            ..Default::default()
        };
        let mut feed = SyntheticFeed::new(feed_config);
        let mut cycles = 0usize;
        let mut degraded = 0usize;

        while let Some(observation) = feed.next_observation() {
            let outcome = runner.execute(&observation);
            if matches!(outcome.provenance, Provenance::Fallback(_)) {
                degraded += 1;
            }
            panel_bridge.publish(&PanelModel::from_outcome(&outcome))?;
            cycles += 1;
        }

        let metrics = runner.metrics_snapshot();
        println!(
            "Offline run -> cycles {}, degraded {}, service {}, fallback {}, override {}, journal errors {}",
            cycles,
            degraded,
            metrics.service_decisions,
            metrics.fallback_decisions,
            metrics.override_decisions,
            metrics.journal_errors
        );
        panel_bridge.publish_status("Offline decision cycles complete.");
    }
    if args.serve {
        panel_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
