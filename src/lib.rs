//! 批量 Token 生成器
//!
//! 对账号列表中的每个账号调用远程接口换取 Token，有界并发、单账号固定间隔重试，
//! 成功结果写入 JSON 文件。

pub mod fetch;
pub mod http_client;
pub mod model;
pub mod pipeline;
pub mod pool;
pub mod storage;
