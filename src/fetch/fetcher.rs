use std::sync::Arc;

use super::endpoint::TokenEndpoint;
use super::outcome::{FailureReason, FetchOutcome};
use super::retry::{RetryPolicy, RetryState};
use crate::pool::Account;

/// 为单个账号获取 Token
///
/// 同一账号的多次尝试严格串行；所有错误都转为 [`FetchOutcome::Failure`]，不会向调用方传播
#[derive(Clone)]
pub struct TokenFetcher {
    endpoint: Arc<dyn TokenEndpoint>,
    policy: RetryPolicy,
}

impl TokenFetcher {
    pub fn new(endpoint: Arc<dyn TokenEndpoint>, policy: RetryPolicy) -> Self {
        Self { endpoint, policy }
    }

    pub async fn fetch(&self, account: &Account) -> FetchOutcome {
        let Some((uid, password)) = account.credentials() else {
            tracing::warn!("❌ 无效账号条目: {:?}", account);
            return FetchOutcome::failure(account.uid_or_empty(), FailureReason::InvalidAccount);
        };

        let mut state = RetryState::start();
        loop {
            match state {
                RetryState::Attempting(attempt) => {
                    if attempt > 1 {
                        tokio::time::sleep(self.policy.delay).await;
                    }

                    let result = self.endpoint.request_token(uid, password).await;
                    match &result {
                        Ok(_) => tracing::info!(uid, attempt, "✅ Token 已生成"),
                        Err(e) => tracing::warn!(
                            uid,
                            attempt,
                            max_attempts = self.policy.max_attempts,
                            "⚠️ 尝试失败: {}",
                            e
                        ),
                    }

                    state = RetryState::Attempting(attempt).advance(result, &self.policy);
                }
                RetryState::Succeeded(token) => return FetchOutcome::success(uid, token),
                RetryState::Exhausted {
                    attempts,
                    last_error,
                } => {
                    tracing::error!(uid, "❌ 重试 {} 次后仍失败", attempts);
                    return FetchOutcome::failure(
                        uid,
                        FailureReason::Exhausted {
                            attempts,
                            last_error,
                        },
                    );
                }
            }
        }
    }
}
