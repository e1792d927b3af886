//! 完整流程：读取账号 → 并发获取 Token → 写出结果

use std::sync::Arc;

use crate::fetch::{HttpTokenEndpoint, RetryPolicy, TokenFetcher};
use crate::http_client::{build_client, ProxyConfig};
use crate::model::config::Config;
use crate::pool::{PoolStats, WorkerPool};
use crate::storage;

/// 按配置构建 worker 池
pub fn build_pool(config: &Config) -> anyhow::Result<WorkerPool> {
    let proxy = ProxyConfig::from_config(config);
    let client = build_client(proxy.as_ref(), config.timeout())?;
    let endpoint = HttpTokenEndpoint::new(client, &config.endpoint_url)?;
    let fetcher = TokenFetcher::new(Arc::new(endpoint), RetryPolicy::from_config(config));
    Ok(WorkerPool::new(fetcher, config.max_workers))
}

/// 执行一次完整的批量生成
///
/// 账号文件读取失败时在发起任何请求前返回错误；
/// 写出失败时返回错误，但统计已在日志中输出
pub async fn run(config: &Config) -> anyhow::Result<PoolStats> {
    let accounts = storage::load_accounts(&config.input_file)?;
    let pool = build_pool(config)?;

    let report = pool.run(accounts).await;
    storage::save_tokens(&config.output_file, &report.records)?;

    Ok(report.stats)
}
