//! 重试状态机
//!
//! 状态转移是纯函数，不涉及 I/O，等待与请求由 [`TokenFetcher`](super::TokenFetcher) 负责

use std::time::Duration;

use super::outcome::{AttemptError, AttemptResult};
use crate::model::config::Config;

/// 重试策略：固定上限 + 固定间隔
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 最大尝试次数（含第一次）
    pub max_attempts: u32,
    /// 两次尝试之间的等待
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_retries, config.retry_delay())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// 单个账号的重试状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryState {
    /// 即将进行第 n 次尝试（从 1 开始）
    Attempting(u32),
    /// 拿到 token
    Succeeded(String),
    /// 尝试次数用尽
    Exhausted {
        attempts: u32,
        last_error: AttemptError,
    },
}

impl RetryState {
    pub fn start() -> Self {
        Self::Attempting(1)
    }

    /// 根据本次尝试结果计算下一个状态，终态保持不变
    pub fn advance(self, result: AttemptResult, policy: &RetryPolicy) -> Self {
        let attempt = match self {
            Self::Attempting(n) => n,
            terminal => return terminal,
        };

        match result {
            Ok(token) => Self::Succeeded(token),
            Err(last_error) if attempt >= policy.max_attempts => Self::Exhausted {
                attempts: attempt,
                last_error,
            },
            Err(_) => Self::Attempting(attempt + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO)
    }

    #[test]
    fn test_success_on_first_attempt() {
        let state = RetryState::start().advance(Ok("tok".to_string()), &policy(5));
        assert_eq!(state, RetryState::Succeeded("tok".to_string()));
    }

    #[test]
    fn test_error_moves_to_next_attempt() {
        let state = RetryState::start().advance(Err(AttemptError::Timeout), &policy(5));
        assert_eq!(state, RetryState::Attempting(2));
    }

    #[test]
    fn test_exhausted_on_last_attempt() {
        let policy = policy(3);
        let mut state = RetryState::start();
        for _ in 0..3 {
            state = state.advance(Err(AttemptError::Status(500)), &policy);
        }
        assert_eq!(
            state,
            RetryState::Exhausted {
                attempts: 3,
                last_error: AttemptError::Status(500),
            }
        );
    }

    #[test]
    fn test_success_on_last_attempt() {
        let state = RetryState::Attempting(5).advance(Ok("late".to_string()), &policy(5));
        assert_eq!(state, RetryState::Succeeded("late".to_string()));
    }

    #[test]
    fn test_terminal_state_is_sticky() {
        let done = RetryState::Succeeded("tok".to_string());
        assert_eq!(
            done.clone().advance(Err(AttemptError::MissingToken), &policy(5)),
            done
        );
    }

    #[test]
    fn test_single_attempt_policy() {
        let state = RetryState::start().advance(Err(AttemptError::MissingToken), &policy(1));
        assert!(matches!(state, RetryState::Exhausted { attempts: 1, .. }));
    }

    #[test]
    fn test_policy_clamps_zero_attempts() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.delay, Duration::from_millis(500));
    }
}
