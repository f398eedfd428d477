use std::fs::File;
use std::io::{prelude::*, BufReader};

use log::error;

use crate::exception::Exception;

/// 从文件中逐行读取待提交的地址，每行一个，忽略空行和首尾空白。
pub fn addresses_from_file(filename: &str) -> Result<Vec<String>, Exception> {
    let file = File::open(filename).map_err(|e| {
        error!("无法打开地址列表文件：{}，错误：{}", filename, e);
        Exception::ConfigUnreadable(format!("{}: {}", filename, e))
    })?;

    let mut addresses = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| Exception::ConfigUnreadable(format!("{}: {}", filename, e)))?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            addresses.push(trimmed.to_string());
        }
    }
    Ok(addresses)
}
