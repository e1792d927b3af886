//! 输入输出文件
//!
//! - `accounts`: 读取账号列表（uid + password）
//! - `tokens`: 写出成功获取的 Token

pub mod accounts;
pub mod tokens;

pub use accounts::{invalid_indices, load_accounts, parse_accounts};
pub use tokens::{save_tokens, to_pretty_json};
