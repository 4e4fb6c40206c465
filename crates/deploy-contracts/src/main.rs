use clap::Parser;

#[tokio::main]
async fn main() {
    let args = deploy_contracts::arguments::Arguments::parse();
    observe::tracing::initialize(&args.logging.observe_config());
    tracing::info!("running deploy-contracts with validated arguments:\n{}", args);

    if let Err(err) = deploy_contracts::run(args).await {
        tracing::error!("Deployment failed: {err}");
        std::process::exit(1);
    }
}
