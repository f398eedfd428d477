// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 请求控制器
//!
//! 串联校验、请求、解释与历史记录，并向宿主界面暴露当前的显示状态。
//!
//! ## 状态流转
//! `Idle -> Pending -> {Succeeded, Failed} -> Idle`，任何状态下的新提交都会重新进入
//! `Pending`（地址被拒绝时直接进入 `Failed`）。
//!
//! ## 并发模型
//! 请求在后台任务中执行，完成结果通过通道回送，由 [`RequestController::next_completion`]
//! 在控制器所在的逻辑线程上逐个应用，因此不需要锁。请求既不会被取消也不会被串行化：
//! 两个重叠请求以到达顺序生效，最后到达的结果决定最终显示。

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    client::{ClassificationClient, ClassificationResponse},
    config::Config,
    exception::Exception,
    history::HistoryLedger,
    interpreter::{interpret, DisplayToken},
    param::{Endpoint, IDLE_TEXT, PENDING_TEXT, WRONG_ADDRESS},
    transport::Transport,
    validator::{validate, PrefixRule},
};

/// 控制器当前所处的状态，每个控制器恰有一个。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Pending,
    Succeeded(DisplayToken),
    Failed(String),
}

struct Completion {
    ticket: u64,
    outcome: Result<ClassificationResponse, Exception>,
}

pub struct RequestController {
    client: ClassificationClient,
    rule: PrefixRule,
    endpoint: Endpoint,
    record_history: bool,
    address: String,
    state: RequestState,
    display_text: String,
    history: HistoryLedger,
    next_ticket: u64,
    in_flight: usize,
    completion_tx: UnboundedSender<Completion>,
    completion_rx: UnboundedReceiver<Completion>,
}

impl RequestController {
    pub fn new(client: ClassificationClient, rule: PrefixRule, endpoint: Endpoint) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            client,
            rule,
            endpoint,
            record_history: true,
            address: String::new(),
            state: RequestState::Idle,
            display_text: IDLE_TEXT.to_string(),
            history: HistoryLedger::new(),
            next_ticket: 0,
            in_flight: 0,
            completion_tx,
            completion_rx,
        }
    }

    pub fn from_config(config: &Config, transport: Arc<dyn Transport>) -> Self {
        let client = ClassificationClient::new(config.base_url(), transport);
        Self::new(client, config.prefix_rule(), config.endpoint())
            .with_history(config.record_history())
    }

    /// 是否把成功的结果写入历史记录
    pub fn with_history(mut self, record_history: bool) -> Self {
        self.record_history = record_history;
        self
    }

    pub fn set_address(&mut self, address: &str) {
        self.address = address.to_string();
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_endpoint(&mut self, endpoint: Endpoint) {
        self.endpoint = endpoint;
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    /// 已发出但尚未应用结果的请求数量
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// 回到 `Idle`，历史记录保持不变。
    pub fn reset(&mut self) {
        self.state = RequestState::Idle;
        self.display_text = IDLE_TEXT.to_string();
    }

    /// 提交当前地址。
    ///
    /// 地址未通过校验时进入 `Failed("Wrong address!")` 并返回 `None`，不会发出任何请求。
    /// 否则进入 `Pending`，在后台发出请求并返回该请求的编号。
    ///
    /// 必须在 tokio 运行时中调用。
    pub fn submit(&mut self) -> Option<u64> {
        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let value = match validate(&self.address, &self.rule) {
            Ok(value) => value,
            Err(e) => {
                warn!("[ID{}]地址 {} 被拒绝：{}", ticket, self.address, e.reason());
                self.state = RequestState::Failed(WRONG_ADDRESS.to_string());
                self.display_text = WRONG_ADDRESS.to_string();
                return None;
            }
        };

        self.state = RequestState::Pending;
        self.display_text = PENDING_TEXT.to_string();
        self.in_flight += 1;
        debug!("[ID{}]向 {} 端点提交 {}", ticket, self.endpoint, value);

        let tx = self.completion_tx.clone();
        self.client
            .request_with(self.endpoint, value, move |outcome| {
                // 控制器被丢弃后接收端关闭，结果无人关心
                let _ = tx.send(Completion { ticket, outcome });
            });
        Some(ticket)
    }

    /// 等待下一个到达的请求结果并应用它。没有请求在途时立即返回 `None`。
    pub async fn next_completion(&mut self) -> Option<&RequestState> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.completion_rx.recv().await?;
        self.apply(completion);
        Some(&self.state)
    }

    /// 提交并等待一个结果。若此前已有请求在途，应用的是最先到达的那个。
    pub async fn submit_and_wait(&mut self) -> &RequestState {
        if self.submit().is_some() {
            self.next_completion().await;
        }
        &self.state
    }

    fn apply(&mut self, completion: Completion) {
        let Completion { ticket, outcome } = completion;
        self.in_flight = self.in_flight.saturating_sub(1);

        match outcome.and_then(|response| interpret(&response)) {
            Ok(token) => {
                info!("[ID{}]请求完成：{}", ticket, token);
                self.display_text = token.to_string();
                if self.record_history {
                    self.history.append(token.clone());
                }
                self.state = RequestState::Succeeded(token);
            }
            Err(e) => {
                warn!("[ID{}]请求失败：{}", ticket, e);
                self.display_text = e.to_string();
                self.state = RequestState::Failed(e.to_string());
            }
        }
    }
}
