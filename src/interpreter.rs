//! # 响应解释模块
//!
//! 将远端返回的两种 JSON 形状统一转换为一个可显示的字符串：
//! 1. `classify`：`classification` 字段，内容为至少两段以换行分隔的文本。
//! 2. `greet`：`pozdrowienie` 字段，内容直接显示。
//!
//! 解释过程是纯函数，不修改历史记录。

use std::fmt;

use serde_derive::Deserialize;

use crate::{client::ClassificationResponse, exception::Exception, param::*};

/// 一次请求最终显示给用户的文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayToken(String);

impl DisplayToken {
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize)]
struct ClassifyBody {
    classification: String,
}

#[derive(Deserialize)]
struct GreetBody {
    pozdrowienie: String,
}

/// 根据响应所属的端点解析出显示文本。
///
/// 字段缺失、类型不符或 classify 结果不足两段时返回 `Exception::MalformedResponse`，
/// 不做任何默认值填充。
pub fn interpret(response: &ClassificationResponse) -> Result<DisplayToken, Exception> {
    match response.endpoint() {
        Endpoint::Classify => {
            let body: ClassifyBody = decode(response)?;
            let parts: Vec<&str> = body.classification.split('\n').collect();
            if parts.len() < 2 {
                return Err(Exception::MalformedResponse(format!(
                    "`{}` has {} segment(s), expected at least 2",
                    CLASSIFICATION_FIELD,
                    parts.len()
                )));
            }
            Ok(DisplayToken(format!(
                "{} {}{}",
                parts[0], CATEGORY_SEPARATOR, parts[1]
            )))
        }
        Endpoint::Greet => {
            let body: GreetBody = decode(response)?;
            Ok(DisplayToken(body.pozdrowienie))
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(response: &ClassificationResponse) -> Result<T, Exception> {
    T::deserialize(response.body()).map_err(|e| Exception::MalformedResponse(e.to_string()))
}
