use serde_derive::Deserialize;
use serde_derive::Serialize;

use log::{error, warn};
use std::fs::File;
use std::io::prelude::*;

use crate::exception::Exception;
use crate::param::{Endpoint, DEFAULT_BASE_URL, DEFAULT_PREFIX};
use crate::validator::PrefixRule;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    base_url: String,
    #[serde(default = "default_endpoint")]
    endpoint: String,
    #[serde(default = "default_prefix")]
    prefix: String,
    #[serde(default = "default_case_sensitive")]
    case_sensitive: bool,
    #[serde(default = "default_record_history")]
    record_history: bool,
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    "classify".to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_case_sensitive() -> bool {
    true
}

fn default_record_history() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: default_endpoint(),
            prefix: default_prefix(),
            case_sensitive: default_case_sensitive(),
            record_history: default_record_history(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    pub fn from_toml(filename: &str) -> Result<Self, Exception> {
        let mut file = File::open(filename)
            .map_err(|e| Exception::ConfigUnreadable(format!("{}: {}", filename, e)))?;
        let mut str_val = String::new();
        file.read_to_string(&mut str_val)
            .map_err(|e| Exception::ConfigUnreadable(format!("{}: {}", filename, e)))?;

        let mut raw_config: Config = match toml::from_str(&str_val) {
            Ok(t) => t,
            Err(e) => {
                error!("无法成功从配置文件构建配置对象，使用默认配置：{}", e);
                Config::new()
            }
        };
        if raw_config.endpoint.parse::<Endpoint>().is_err() {
            warn!(
                "endpoint被设置为{}，但服务端不提供该端点，因此该值将被改为classify。",
                raw_config.endpoint
            );
            raw_config.endpoint = default_endpoint();
        }
        if raw_config.request_timeout_secs == 0 {
            warn!("request_timeout_secs被设置为0，请求将永远无法超时，因此该值将被改为30。");
            raw_config.request_timeout_secs = default_request_timeout_secs();
        }
        Ok(raw_config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint.parse().unwrap_or(Endpoint::Classify)
    }

    pub fn prefix_rule(&self) -> PrefixRule {
        PrefixRule::new(&self.prefix, self.case_sensitive)
    }

    pub fn record_history(&self) -> bool {
        self.record_history
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }
}
