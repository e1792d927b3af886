//! Token 获取模块
//!
//! 单个账号的请求、响应判定与固定间隔重试：
//! - `endpoint`: 远程接口抽象及 reqwest 实现
//! - `retry`: 重试策略与状态机
//! - `outcome`: 尝试结果与最终结果类型
//! - `fetcher`: 串起以上部分的 [`TokenFetcher`]

pub mod endpoint;
pub mod fetcher;
pub mod outcome;
pub mod retry;

pub use endpoint::{HttpTokenEndpoint, TokenEndpoint};
pub use fetcher::TokenFetcher;
pub use outcome::{AttemptError, AttemptResult, FailureReason, FetchOutcome, TokenRecord};
pub use retry::{RetryPolicy, RetryState};
