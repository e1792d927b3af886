//! 单次尝试与单个账号的结果类型

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 单次请求的失败原因，全部视为可重试
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error("请求超时")]
    Timeout,

    #[error("请求失败: {0}")]
    Transport(String),

    #[error("状态码: {0}")]
    Status(u16),

    #[error("响应体无法解析: {0}")]
    InvalidBody(String),

    #[error("响应中没有 token")]
    MissingToken,
}

/// 单次尝试结果：成功时携带 token
pub type AttemptResult = Result<String, AttemptError>;

/// 输出文件中的一条记录
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRecord {
    pub uid: String,
    pub token: String,
}

/// 账号最终失败的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// uid 或 password 缺失，未发起任何请求
    InvalidAccount,
    /// 全部尝试均失败
    Exhausted {
        attempts: u32,
        last_error: AttemptError,
    },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAccount => write!(f, "invalid account entry"),
            Self::Exhausted {
                attempts,
                last_error,
            } => write!(f, "failed after {} retries ({})", attempts, last_error),
        }
    }
}

/// 单个账号的最终结果，每个账号只产生一次
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(TokenRecord),
    Failure { uid: String, reason: FailureReason },
}

impl FetchOutcome {
    pub fn success(uid: impl Into<String>, token: impl Into<String>) -> Self {
        Self::Success(TokenRecord {
            uid: uid.into(),
            token: token.into(),
        })
    }

    pub fn failure(uid: impl Into<String>, reason: FailureReason) -> Self {
        Self::Failure {
            uid: uid.into(),
            reason,
        }
    }

    /// 取出成功记录，失败时返回 None
    pub fn into_record(self) -> Option<TokenRecord> {
        match self {
            Self::Success(record) => Some(record),
            Self::Failure { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reason_display() {
        assert_eq!(FailureReason::InvalidAccount.to_string(), "invalid account entry");

        let reason = FailureReason::Exhausted {
            attempts: 5,
            last_error: AttemptError::Status(503),
        };
        assert_eq!(reason.to_string(), "failed after 5 retries (状态码: 503)");
    }

    #[test]
    fn test_into_record() {
        let ok = FetchOutcome::success("1", "tok");
        assert_eq!(
            ok.into_record(),
            Some(TokenRecord {
                uid: "1".to_string(),
                token: "tok".to_string()
            })
        );

        let failed = FetchOutcome::failure("2", FailureReason::InvalidAccount);
        assert!(failed.into_record().is_none());
    }
}
