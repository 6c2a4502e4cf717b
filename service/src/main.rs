use anyhow::Context;
use clap::Parser;
use config::ServiceConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use trafficcore::policy::DecisionPolicy;

mod config;
mod routes;

#[derive(Parser)]
#[command(author, version, about = "HTTP decision service for adaptive signal timing")]
struct Args {
    /// Load a service config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 5000)]
    port: u16,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let service_config = if let Some(path) = args.config {
        ServiceConfig::load(path)?
    } else {
        ServiceConfig::from_args(args.port)
    };

    let policy = Arc::new(DecisionPolicy::new(service_config.policy.clone()));
    let routes = routes::routes(policy);

    log::info!(
        "decision service listening on 127.0.0.1:{}",
        service_config.port
    );
    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for the decision service")?;
    runtime.block_on(async move {
        warp::serve(routes)
            .run(([127, 0, 0, 1], service_config.port))
            .await;
    });

    Ok(())
}
