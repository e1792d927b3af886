//! 账号列表文件读取

use anyhow::Context;
use std::fs;
use std::path::Path;

use crate::pool::Account;

/// 从 JSON 字符串解析账号列表
///
/// 顶层必须是对象数组；单个条目缺字段不算错误，由 fetcher 判定为无效账号
pub fn parse_accounts(json: &str) -> Result<Vec<Account>, serde_json::Error> {
    serde_json::from_str(json)
}

/// 从文件加载账号列表，读取或解析失败都视为启动错误
pub fn load_accounts<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Account>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("读取账号文件失败: {}", path.display()))?;
    let accounts = parse_accounts(&content)
        .with_context(|| format!("解析账号文件失败: {}", path.display()))?;

    let invalid = invalid_indices(&accounts);
    for &index in &invalid {
        tracing::warn!(index, "❌ 无效账号条目: {:?}", accounts[index]);
    }
    tracing::info!(
        "从 {} 加载 {} 个账号（无效条目 {}）",
        path.display(),
        accounts.len(),
        invalid.len()
    );
    Ok(accounts)
}

/// 无效条目在输入文件中的位置（从 0 开始）
pub fn invalid_indices(accounts: &[Account]) -> Vec<usize> {
    accounts
        .iter()
        .enumerate()
        .filter(|(_, account)| !account.is_valid())
        .map(|(index, _)| index)
        .collect()
}
