// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Exception 模块
//!
//! 该模块定义了一次分类请求在其生命周期中可能出现的各类异常情况。
//!
//! ## 设计意图
//! - **错误分类**：涵盖了地址校验失败、响应格式错误以及传输层（HTTP）失败。
//! - **作用域**：所有异常都只影响当前这一次请求，控制器随后即可接受下一次提交。
//! - **用户友好**：通过实现 `std::fmt::Display`，确保错误信息可以被记录到日志或直接显示给用户。

use std::fmt;

use crate::param::INVALID_PREFIX;

/// 分类请求处理过程中发生的异常类型。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exception {
    /// 用户输入的地址不满足当前配置的前缀规则。
    /// 控制器会将其转化为固定提示 `Wrong address!`，且不会发起任何网络请求。
    InvalidAddress,
    /// 端点名称不在支持的集合（classify / greet）之内。
    UnknownEndpoint(String),
    /// 远端返回的 JSON 缺少预期字段，或字段内容无法解析。
    MalformedResponse(String),
    /// 网络层或协作方失败：连接错误、超时、非 2xx 状态码或响应体不是 JSON。
    TransportFailure(String),
    /// 配置文件无法读取。
    ConfigUnreadable(String),
}

use Exception::*;

impl Exception {
    /// 返回简短的机器可读原因，用于 `RequestState::Failed`。
    pub fn reason(&self) -> String {
        match self {
            InvalidAddress => INVALID_PREFIX.to_string(),
            UnknownEndpoint(name) => format!("unknown-endpoint: {}", name),
            MalformedResponse(detail) => format!("malformed-response: {}", detail),
            TransportFailure(detail) => format!("transport-failure: {}", detail),
            ConfigUnreadable(detail) => format!("config-unreadable: {}", detail),
        }
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidAddress => write!(f, "Address does not match the configured prefix"),
            UnknownEndpoint(name) => write!(f, "Unknown endpoint: {}", name),
            MalformedResponse(detail) => write!(f, "Malformed response: {}", detail),
            TransportFailure(detail) => write!(f, "Request failed: {}", detail),
            ConfigUnreadable(detail) => write!(f, "Couldn't read config file: {}", detail),
        }
    }
}

impl From<reqwest::Error> for Exception {
    fn from(e: reqwest::Error) -> Self {
        TransportFailure(e.to_string())
    }
}
