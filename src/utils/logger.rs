use clap::ValueEnum;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日誌輸出格式；容器部署時用 json
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// 未設定 RUST_LOG 時的預設過濾；verbose 會打開 tower_http 的請求追蹤
pub fn filter_directives(verbose: bool) -> &'static str {
    if verbose {
        "oracle_node=debug,tower_http=debug,info"
    } else {
        "oracle_node=info,tower_http=warn"
    }
}

pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(verbose)));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().with_target(verbose).compact())
            .init(),
        // json 保留 target，方便依模組篩選驗證請求
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .json()
                    .with_current_span(true),
            )
            .init(),
    }
}
