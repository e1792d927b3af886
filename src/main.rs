use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jwtgen_rs::model::arg::Args;
use jwtgen_rs::model::config::Config;
use jwtgen_rs::pipeline;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config_path = args
        .config
        .unwrap_or_else(|| Config::default_config_path().to_string());
    let mut config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("加载配置失败: {:#}", e);
            std::process::exit(1);
        }
    };
    config.override_from_env();

    if let Some(input) = args.input {
        config.input_file = input;
    }
    if let Some(output) = args.output {
        config.output_file = output;
    }

    if let Err(e) = config.validate() {
        tracing::error!("配置无效: {:#}", e);
        std::process::exit(1);
    }

    tracing::debug!(
        "接口 {}，最大尝试 {} 次，并发 {}，超时 {}s，重试间隔 {}ms",
        config.endpoint_url,
        config.max_retries,
        config.max_workers,
        config.timeout_secs,
        config.retry_delay_ms
    );

    match pipeline::run(&config).await {
        Ok(stats) => {
            tracing::info!(
                "完成: 成功 {}/{}（输入 {} 条）",
                stats.succeeded,
                stats.attempted(),
                stats.total
            );
        }
        Err(e) => {
            tracing::error!("❌ {:#}", e);
            std::process::exit(1);
        }
    }
}
