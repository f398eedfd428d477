//! # 传输层
//!
//! 核心流程只依赖 [`Transport`] 这一能力：对给定 URL 发起 GET，并返回解码后的 JSON。
//! [`HttpTransport`] 是基于 reqwest 的默认实现。

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};

use crate::exception::Exception;

/// 发送 GET 请求并返回 JSON 响应体的能力。
///
/// 失败时返回 `Exception::TransportFailure`，调用方原样转发，不做解释。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, Exception>;
}

/// 基于 reqwest 的 HTTP 传输实现
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// 构造带整体超时的客户端。超时后请求以 `TransportFailure` 结束，而不是一直挂起。
    pub fn new(timeout: Duration) -> Result<Self, Exception> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// 使用调用方配置好的 reqwest 客户端（代理、证书等）
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, Exception> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(|e| {
            error!("HTTP请求失败：{}，错误：{}", url, e);
            Exception::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("远端服务返回{}：{}", status, url);
            return Err(Exception::TransportFailure(format!("HTTP {}", status)));
        }

        let body = response.json::<serde_json::Value>().await?;
        Ok(body)
    }
}
