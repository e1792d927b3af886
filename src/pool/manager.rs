//! 并发 worker 池
//!
//! 每个账号一个 tokio 任务，Semaphore 限制同时执行的数量，
//! 结果通过 JoinSet 按完成顺序收集

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::account::Account;
use crate::fetch::{FailureReason, FetchOutcome, TokenFetcher, TokenRecord};

/// 一次运行的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// 输入账号总数
    pub total: usize,
    /// 无效条目（未发起请求）
    pub invalid: usize,
    /// 成功获取 Token
    pub succeeded: usize,
    /// 重试耗尽或任务异常
    pub failed: usize,
}

impl PoolStats {
    /// 实际发起过请求的账号数
    pub fn attempted(&self) -> usize {
        self.total - self.invalid
    }

    fn record(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Success(_) => self.succeeded += 1,
            FetchOutcome::Failure {
                reason: FailureReason::InvalidAccount,
                ..
            } => self.invalid += 1,
            FetchOutcome::Failure { .. } => self.failed += 1,
        }
    }
}

/// 一次运行的结果：成功记录（顺序不定）与统计
#[derive(Debug, Clone, Default)]
pub struct PoolReport {
    pub records: Vec<TokenRecord>,
    pub stats: PoolStats,
}

/// 有界并发的 Token 获取池
#[derive(Clone)]
pub struct WorkerPool {
    fetcher: TokenFetcher,
    max_workers: usize,
}

impl WorkerPool {
    pub fn new(fetcher: TokenFetcher, max_workers: usize) -> Self {
        Self {
            fetcher,
            max_workers: max_workers.max(1),
        }
    }

    /// 处理全部账号，所有任务结束后才返回
    ///
    /// 单个账号失败（包括任务 panic）只计入统计，不影响其他账号
    pub async fn run(&self, accounts: Vec<Account>) -> PoolReport {
        let permits = Arc::new(Semaphore::new(self.max_workers));
        let mut tasks = JoinSet::new();
        let mut stats = PoolStats {
            total: accounts.len(),
            ..PoolStats::default()
        };

        tracing::info!(
            "开始处理 {} 个账号，并发上限 {}",
            accounts.len(),
            self.max_workers
        );

        for account in accounts {
            let permits = Arc::clone(&permits);
            let fetcher = self.fetcher.clone();
            tasks.spawn(async move {
                // Semaphore 从不关闭，acquire 只会在关闭时失败
                let _permit = permits.acquire_owned().await.ok();
                fetcher.fetch(&account).await
            });
        }

        let mut records = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => {
                    stats.record(&outcome);
                    if let Some(record) = outcome.into_record() {
                        records.push(record);
                    }
                }
                Err(e) => {
                    tracing::error!("账号任务异常退出: {}", e);
                    stats.failed += 1;
                }
            }
        }

        tracing::info!(
            "处理完成: 成功 {}/{}，失败 {}，无效条目 {}",
            stats.succeeded,
            stats.attempted(),
            stats.failed,
            stats.invalid
        );

        PoolReport { records, stats }
    }
}
