// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 分类服务协议参数与常量模块
//!
//! 该模块定义了客户端与远端分类服务之间约定的常量和数据结构，包括：
//! - 查询参数名与响应字段名。
//! - 界面上显示的固定文本。
//! - 端点（Endpoint）的强类型枚举。

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;

use crate::exception::Exception;

/// 默认的服务基础地址，端点名直接拼接在其后
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/ajax/calcpy/";

/// 默认的地址前缀规则
pub const DEFAULT_PREFIX: &str = "https://en.wikipedia.org/wiki/";

/// 查询字符串中携带地址的参数名
pub const QUERY_KEY: &str = "word";

/// classify 端点响应中的字段名
pub const CLASSIFICATION_FIELD: &str = "classification";

/// classify 结果中类别前的分隔文本
pub const CATEGORY_SEPARATOR: &str = " kategoria:";

/// 地址校验失败时显示给用户的固定提示
pub const WRONG_ADDRESS: &str = "Wrong address!";

/// 请求进行中时的显示文本
pub const PENDING_TEXT: &str = "Loading...";

/// 尚未发起任何请求时的显示文本
pub const IDLE_TEXT: &str = "no data!";

/// 前缀规则不满足时的拒绝原因
pub const INVALID_PREFIX: &str = "invalid-prefix";

lazy_static! {
    /// 远端服务当前提供的端点列表。
    ///
    /// 控制台的 `use` 指令与配置加载都以该列表为准。
    pub static ref SUPPORTED_ENDPOINTS: Vec<Endpoint> = {
        vec![
            Endpoint::Classify,
            Endpoint::Greet,
        ]
    };
}

/// 远端服务的操作标识
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// 对单词或链接进行分类，响应为多行字符串
    Classify,
    /// 问候接口，响应字段可直接显示
    Greet,
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match *self {
            Endpoint::Classify => "classify",
            Endpoint::Greet => "greet",
        }
    }
}

impl fmt::Display for Endpoint {
    /// 将枚举格式化为 URL 中使用的端点名
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Endpoint {
    type Err = Exception;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SUPPORTED_ENDPOINTS
            .iter()
            .find(|e| e.name() == s)
            .copied()
            .ok_or_else(|| Exception::UnknownEndpoint(s.to_string()))
    }
}
