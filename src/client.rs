// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 分类服务客户端
//!
//! 负责根据端点名和已校验的地址拼出请求 URL，并通过 [`Transport`] 发出请求。
//! 提供两种调用形式：
//! - [`ClassificationClient::request`]：直接 `await` 结果。
//! - [`ClassificationClient::request_with`]：在后台任务中执行，完成后恰好调用一次回调。
//!
//! 客户端不取消、不合并、不重试请求；重叠的请求各自独立完成。

use std::sync::Arc;

use log::{debug, error};
use tokio::task::JoinHandle;

use crate::{
    exception::Exception,
    param::{Endpoint, QUERY_KEY},
    transport::Transport,
    validator::NormalizedAddress,
};

/// 一次用户操作对应的请求，构造后不可变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    endpoint: Endpoint,
    value: NormalizedAddress,
}

impl ClassificationRequest {
    pub fn new(endpoint: Endpoint, value: NormalizedAddress) -> Self {
        Self { endpoint, value }
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn value(&self) -> &NormalizedAddress {
        &self.value
    }
}

/// 远端返回的 JSON 响应体，按产生它的端点打上标签。
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResponse {
    endpoint: Endpoint,
    body: serde_json::Value,
}

impl ClassificationResponse {
    pub fn new(endpoint: Endpoint, body: serde_json::Value) -> Self {
        Self { endpoint, body }
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn body(&self) -> &serde_json::Value {
        &self.body
    }
}

#[derive(Clone)]
pub struct ClassificationClient {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl ClassificationClient {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.to_string(),
            transport,
        }
    }

    /// 拼接 `{base_url}{endpoint}?word={value}`，值不做转义。
    pub fn url_for(&self, endpoint: Endpoint, value: &NormalizedAddress) -> String {
        format!("{}{}?{}={}", self.base_url, endpoint, QUERY_KEY, value)
    }

    pub async fn request(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationResponse, Exception> {
        let url = self.url_for(request.endpoint(), request.value());
        let body = self.transport.get_json(&url).await?;
        debug!("{} 返回：{}", url, body);
        Ok(ClassificationResponse::new(request.endpoint(), body))
    }

    /// 在 tokio 运行时上执行请求，完成后调用 `on_complete` 恰好一次。
    ///
    /// 传输层的错误原样交给回调；请求任务异常终止（如传输实现 panic）时，
    /// 回调收到 `TransportFailure`。
    pub fn request_with<F>(
        &self,
        endpoint: Endpoint,
        value: NormalizedAddress,
        on_complete: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(Result<ClassificationResponse, Exception>) + Send + 'static,
    {
        let client = self.clone();
        let request = ClassificationRequest::new(endpoint, value);
        let task = tokio::spawn(async move { client.request(&request).await });
        tokio::spawn(async move {
            let outcome = match task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("请求任务异常终止：{}", e);
                    Err(Exception::TransportFailure(format!("request task aborted: {}", e)))
                }
            };
            on_complete(outcome);
        })
    }
}
