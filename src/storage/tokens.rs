//! Token 结果文件写出

use anyhow::Context;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

use crate::fetch::TokenRecord;

/// 序列化为 4 空格缩进的 JSON 数组
pub fn to_pretty_json(records: &[TokenRecord]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut ser)?;
    Ok(buf)
}

/// 写出全部成功记录，失败时返回错误由调用方上报
pub fn save_tokens<P: AsRef<Path>>(path: P, records: &[TokenRecord]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = to_pretty_json(records).context("序列化 Token 失败")?;
    fs::write(path, json).with_context(|| format!("保存 Token 失败: {}", path.display()))?;

    tracing::info!("✅ {} 个 Token 已保存到 {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_json_format() {
        let records = vec![TokenRecord {
            uid: "1".to_string(),
            token: "abc".to_string(),
        }];
        let json = String::from_utf8(to_pretty_json(&records).unwrap()).unwrap();
        assert_eq!(
            json,
            "[\n    {\n        \"uid\": \"1\",\n        \"token\": \"abc\"\n    }\n]"
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(to_pretty_json(&[]).unwrap(), b"[]");
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let err = save_tokens("/definitely/not/here/token_bd.json", &[]).unwrap_err();
        assert!(err.to_string().contains("保存 Token 失败"));
    }
}
