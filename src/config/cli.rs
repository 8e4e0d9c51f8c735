use crate::utils::logger::LogFormat;
use clap::Parser;

/// 命令列參數；未指定的值由 TOML 設定或預設值補上
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "oracle-node")]
#[command(about = "Verification oracle node: existence, ownership and activity checks")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to bind [default: 0.0.0.0]
    #[arg(long)]
    pub bind: Option<String>,

    /// Port to listen on [default: 8081]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Request body read deadline in seconds [default: 10]
    #[arg(long)]
    pub read_timeout_secs: Option<u64>,

    /// Verifier deadline in seconds [default: 10]
    #[arg(long)]
    pub write_timeout_secs: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
