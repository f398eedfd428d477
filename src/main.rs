// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 分类服务控制台客户端
//!
//! 该程序是 `RequestController` 的宿主界面：
//! - 从标准输入读取地址并提交给远端分类服务
//! - 显示每次请求的结果与历史记录
//! - 支持切换端点与从文件批量提交

use std::{sync::Arc, time::Duration};

use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use webclass::{
    param::SUPPORTED_ENDPOINTS, util::addresses_from_file, Config, Endpoint, HttpTransport,
    RequestController,
};

const CONFIG_FILE: &str = "config/development.toml";
const LOG_CONFIG_FILE: &str = "config/log4rs.yaml";

/// # 程序入口点
///
/// 初始化日志、加载配置、构建控制器并启动交互式控制台。
#[tokio::main]
async fn main() {
    // 1. 初始化日志系统：通过外部 YAML 配置级别与输出目的地
    if let Err(e) = log4rs::init_file(LOG_CONFIG_FILE, Default::default()) {
        eprintln!("无法加载日志配置 {}：{}", LOG_CONFIG_FILE, e);
    }

    // 2. 环境配置加载：读取失败时使用默认配置继续运行
    let config = match Config::from_toml(CONFIG_FILE) {
        Ok(config) => {
            info!("配置文件已载入");
            config
        }
        Err(e) => {
            warn!("{}，使用默认配置", e);
            Config::new()
        }
    };
    info!("服务地址：{}", config.base_url());
    info!("当前端点：{}", config.endpoint());

    // 3. 传输层初始化
    let transport = match HttpTransport::new(Duration::from_secs(config.request_timeout_secs())) {
        Ok(t) => t,
        Err(e) => {
            error!("无法构建HTTP客户端：{}", e);
            return;
        }
    };
    let mut controller = RequestController::from_config(&config, Arc::new(transport));

    // 4. 交互式控制台
    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut input = String::new();
    println!("{}", controller.display_text());
    loop {
        input.clear();
        match reader.read_line(&mut input).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!("读取标准输入失败：{}", e);
                break;
            }
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }
        let (cmd, arg) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };
        match cmd {
            "stop" => {
                info!("接收到停机指令，正在退出...");
                break;
            }
            "help" => print_help(),
            "status" => {
                println!("== Webclass 状态 ===");
                println!("当前状态: {:?}", controller.state());
                println!("当前端点: {}", controller.endpoint());
                println!("在途请求: {}", controller.in_flight());
                println!("历史条数: {}", controller.history().len());
                println!("====================");
            }
            "history" => {
                for token in controller.history().iter() {
                    println!("{}", token);
                }
            }
            "reset" => {
                controller.reset();
                println!("{}", controller.display_text());
            }
            "use" => match arg.parse::<Endpoint>() {
                Ok(endpoint) => {
                    controller.set_endpoint(endpoint);
                    println!("端点已切换为 {}", endpoint);
                }
                Err(e) => println!("{}", e),
            },
            "batch" => match addresses_from_file(arg) {
                Ok(addresses) => {
                    info!("从 {} 读取到 {} 个地址", arg, addresses.len());
                    for address in addresses {
                        submit(&mut controller, &address).await;
                    }
                }
                Err(e) => println!("{}", e),
            },
            _ => submit(&mut controller, line).await,
        }
    }
}

async fn submit(controller: &mut RequestController, address: &str) {
    controller.set_address(address);
    controller.submit_and_wait().await;
    println!("{}", controller.display_text());
}

fn print_help() {
    let endpoints: Vec<String> = SUPPORTED_ENDPOINTS.iter().map(|e| e.to_string()).collect();
    println!("== Webclass Help ==");
    println!("<address>      - 提交地址并显示结果");
    println!("use <endpoint> - 切换端点（{}）", endpoints.join(" / "));
    println!("batch <file>   - 逐行提交文件中的地址");
    println!("history        - 显示历史结果（最新在前）");
    println!("status         - 查看当前状态");
    println!("reset          - 回到初始状态");
    println!("stop           - 退出");
    println!("====================");
}
