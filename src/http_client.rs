//! HTTP Client 构建模块
//!
//! 所有 worker 共享同一个 reqwest::Client（内部连接池），超时在构建时统一设置

use reqwest::{Client, Proxy};
use std::time::Duration;

use crate::model::config::Config;

/// 代理配置
#[derive(Debug, Clone, Default)]
pub struct ProxyConfig {
    /// 代理地址，支持 http/https/socks5
    pub url: String,
    /// 代理认证用户名
    pub username: Option<String>,
    /// 代理认证密码
    pub password: Option<String>,
}

impl ProxyConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
        }
    }

    pub fn with_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// 从运行配置提取代理，未配置 proxyUrl 时返回 None
    pub fn from_config(config: &Config) -> Option<Self> {
        let url = config.proxy_url.as_deref().filter(|u| !u.is_empty())?;
        let proxy = Self::new(url);
        match (&config.proxy_username, &config.proxy_password) {
            (Some(username), Some(password)) => Some(proxy.with_auth(username, password)),
            _ => Some(proxy),
        }
    }
}

/// 构建 HTTP Client
///
/// `timeout` 覆盖整个请求（连接、发送、读取响应体），超时视为一次可重试的传输错误
pub fn build_client(proxy: Option<&ProxyConfig>, timeout: Duration) -> anyhow::Result<Client> {
    let mut builder = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("jwtgen-rs/", env!("CARGO_PKG_VERSION")));

    if let Some(proxy_config) = proxy {
        let mut proxy = Proxy::all(&proxy_config.url)?;

        if let (Some(username), Some(password)) = (&proxy_config.username, &proxy_config.password) {
            proxy = proxy.basic_auth(username, password);
        }

        builder = builder.proxy(proxy);
        tracing::debug!("HTTP Client 使用代理: {}", proxy_config.url);
    }

    Ok(builder.build()?)
}
