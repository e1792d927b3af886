use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// 批量生成 Token 的运行配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Token 生成接口地址，uid 和 password 以查询参数附加
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// 每个账号的最大尝试次数
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// 同时进行中的请求上限
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// 单次请求超时（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// 两次尝试之间的等待时间（毫秒）
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// 账号列表文件
    #[serde(default = "default_input_file")]
    pub input_file: String,

    /// Token 输出文件
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// HTTP 代理地址（可选）
    /// 支持格式: http://host:port, https://host:port, socks5://host:port
    #[serde(default)]
    pub proxy_url: Option<String>,

    /// 代理认证用户名（可选）
    #[serde(default)]
    pub proxy_username: Option<String>,

    /// 代理认证密码（可选）
    #[serde(default)]
    pub proxy_password: Option<String>,
}

impl Config {
    /// 从环境变量覆盖配置
    pub fn override_from_env(&mut self) {
        if let Ok(url) = env::var("ENDPOINT_URL") {
            self.endpoint_url = url;
        }
        if let Some(n) = parse_env("MAX_RETRIES") {
            self.max_retries = n;
        }
        if let Some(n) = parse_env("MAX_WORKERS") {
            self.max_workers = n;
        }
        if let Some(n) = parse_env("TIMEOUT_SECS") {
            self.timeout_secs = n;
        }
        if let Some(n) = parse_env("RETRY_DELAY_MS") {
            self.retry_delay_ms = n;
        }
        if let Ok(input) = env::var("INPUT_FILE") {
            self.input_file = input;
        }
        if let Ok(output) = env::var("OUTPUT_FILE") {
            self.output_file = output;
        }
        if let Ok(proxy) = env::var("PROXY_URL") {
            self.proxy_url = Some(proxy);
        }
        if let Ok(username) = env::var("PROXY_USERNAME") {
            self.proxy_username = Some(username);
        }
        if let Ok(password) = env::var("PROXY_PASSWORD") {
            self.proxy_password = Some(password);
        }
    }

    /// 校验配置取值，非法配置在启动阶段直接失败
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_retries == 0 {
            anyhow::bail!("maxRetries 必须至少为 1");
        }
        if self.max_workers == 0 {
            anyhow::bail!("maxWorkers 必须至少为 1");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeoutSecs 必须至少为 1");
        }

        let url = reqwest::Url::parse(&self.endpoint_url)
            .with_context(|| format!("endpointUrl 不是合法的 URL: {}", self.endpoint_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("endpointUrl 仅支持 http/https: {}", self.endpoint_url);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("忽略无法解析的环境变量 {}={}", key, raw);
            None
        }
    }
}

fn default_endpoint_url() -> String {
    "https://jwt-generate-danssrmdn.vercel.app/token".to_string()
}

fn default_max_retries() -> u32 {
    5
}

fn default_max_workers() -> usize {
    15
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_input_file() -> String {
    "uid_bd.json".to_string()
}

fn default_output_file() -> String {
    "token_bd.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            max_retries: default_max_retries(),
            max_workers: default_max_workers(),
            timeout_secs: default_timeout_secs(),
            retry_delay_ms: default_retry_delay_ms(),
            input_file: default_input_file(),
            output_file: default_output_file(),
            proxy_url: None,
            proxy_username: None,
            proxy_password: None,
        }
    }
}

impl Config {
    /// 获取默认配置文件路径
    pub fn default_config_path() -> &'static str {
        "config.json"
    }

    /// 从文件加载配置
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            // 配置文件不存在，返回默认配置
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;
        Ok(config)
    }
}
