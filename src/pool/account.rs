//! 账号数据模型

use serde::{Deserialize, Deserializer};
use std::fmt;

/// 账号凭证（uid + password）
///
/// 输入文件中字段缺失、为 null 或为空字符串的条目仍会被加载，
/// 但 [`Account::credentials`] 返回 None，由 fetcher 直接判定为无效账号
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Account {
    /// 账号标识
    #[serde(default, deserialize_with = "lenient_string")]
    pub uid: Option<String>,
    /// 账号密码
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: Option<String>,
}

impl Account {
    pub fn new(uid: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            password: Some(password.into()),
        }
    }

    /// 返回 (uid, password)，任一字段缺失或为空时返回 None
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let uid = self.uid.as_deref().filter(|s| !s.is_empty())?;
        let password = self.password.as_deref().filter(|s| !s.is_empty())?;
        Some((uid, password))
    }

    pub fn is_valid(&self) -> bool {
        self.credentials().is_some()
    }

    /// 日志中使用的 uid，缺失时为空字符串
    pub fn uid_or_empty(&self) -> &str {
        self.uid.as_deref().unwrap_or_default()
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("uid", &self.uid)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// 接受字符串或整数（部分账号文件里 uid 是数字），数值 0 视为缺失
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    })
}
