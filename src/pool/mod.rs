//! 账号池模块
//!
//! 账号模型与有界并发的批量处理

pub mod account;
pub mod manager;

pub use account::Account;
pub use manager::{PoolReport, PoolStats, WorkerPool};
