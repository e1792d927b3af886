//! Token 生成接口
//!
//! `GET <endpoint>?uid=<uid>&password=<password>`，成功时返回 `{"token": "..."}`

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::outcome::{AttemptError, AttemptResult};

/// 远程 Token 接口的抽象
///
/// 实现必须把所有错误折叠进 [`AttemptResult`]，不得 panic
#[async_trait]
pub trait TokenEndpoint: Send + Sync {
    /// 发起一次请求
    async fn request_token(&self, uid: &str, password: &str) -> AttemptResult;
}

/// 基于 reqwest 的 HTTP 实现
#[derive(Debug, Clone)]
pub struct HttpTokenEndpoint {
    client: Client,
    base_url: Url,
}

impl HttpTokenEndpoint {
    pub fn new(client: Client, endpoint_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(endpoint_url)?;
        Ok(Self { client, base_url })
    }

    /// 构建请求 URL
    ///
    /// uid 与 password 作为查询参数追加并做 URL 编码，保留接口地址上已有的查询参数
    pub fn request_url(&self, uid: &str, password: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("uid", uid)
            .append_pair("password", password);
        url
    }
}

#[async_trait]
impl TokenEndpoint for HttpTokenEndpoint {
    async fn request_token(&self, uid: &str, password: &str) -> AttemptResult {
        let url = self.request_url(uid, password);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AttemptError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(transport_error)?;
        parse_token_body(&body)
    }
}

/// reqwest 的错误信息默认带 URL，URL 中含有密码，需要去掉
fn transport_error(err: reqwest::Error) -> AttemptError {
    if err.is_timeout() {
        return AttemptError::Timeout;
    }
    AttemptError::Transport(err.without_url().to_string())
}

/// 解析 200 响应体
///
/// 非 JSON 对象视为无法解析；`token` 缺失、非字符串或为空均视为没有 token，两者都可重试
pub fn parse_token_body(body: &[u8]) -> AttemptResult {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| AttemptError::InvalidBody(e.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| AttemptError::InvalidBody("响应不是 JSON 对象".to_string()))?;

    match object.get("token").and_then(|v| v.as_str()) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(AttemptError::MissingToken),
    }
}
