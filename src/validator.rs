//! # 地址校验模块
//!
//! 在发出任何网络请求之前，根据前缀规则判断用户输入的地址是否可接受。
//! 只做前缀判断，不做长度或字符集检查。

use std::fmt;

use log::debug;

use crate::exception::Exception;

/// 前缀规则：地址必须以 `prefix` 开头。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRule {
    prefix: String,
    case_sensitive: bool,
}

impl PrefixRule {
    pub fn new(prefix: &str, case_sensitive: bool) -> Self {
        Self {
            prefix: prefix.to_string(),
            case_sensitive,
        }
    }

    /// 逐字节比较，例如完整的 URL 前缀 `https://en.wikipedia.org/wiki/`
    pub fn case_sensitive(prefix: &str) -> Self {
        Self::new(prefix, true)
    }

    /// 忽略大小写，例如裸域名片段 `en.wikipedia`
    pub fn case_insensitive(prefix: &str) -> Self {
        Self::new(prefix, false)
    }

    fn matches(&self, address: &str) -> bool {
        if self.case_sensitive {
            address.starts_with(&self.prefix)
        } else {
            // 逐字符比较，整串小写化会受上下文影响（如希腊文词尾 sigma）
            let mut chars = address.chars();
            self.prefix.chars().all(|p| match chars.next() {
                Some(c) => c.to_lowercase().eq(p.to_lowercase()),
                None => false,
            })
        }
    }
}

/// 已通过校验的地址。
///
/// 只能由 [`validate`] 构造，客户端只接受该类型，未经校验的原始输入无法到达网络层。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAddress(String);

impl NormalizedAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 按规则校验地址。通过时原样返回输入，失败时返回 `Exception::InvalidAddress`。
pub fn validate(address: &str, rule: &PrefixRule) -> Result<NormalizedAddress, Exception> {
    if rule.matches(address) {
        Ok(NormalizedAddress(address.to_string()))
    } else {
        debug!("地址 {} 不满足前缀规则 {:?}", address, rule);
        Err(Exception::InvalidAddress)
    }
}
