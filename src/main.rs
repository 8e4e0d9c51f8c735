use clap::Parser;
use oracle_node::utils::{logger, validation::Validate};
use oracle_node::{CliConfig, OracleConfig, OracleServer, VerifierRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(cli.log_format, cli.verbose);

    tracing::info!("Starting oracle node");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match OracleConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let registry = VerifierRegistry::from_config(&config)?;
    let server = OracleServer::new(&config, registry);

    if let Err(e) = server.run().await {
        tracing::error!("❌ Oracle node stopped: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("Oracle node stopped");
    Ok(())
}
