use std::collections::VecDeque;

use crate::interpreter::DisplayToken;

/// 已产生的显示结果，最新的排在最前。
///
/// 不去重、不限长、不持久化，进程退出即清空。
#[derive(Debug, Default)]
pub struct HistoryLedger {
    tokens: VecDeque<DisplayToken>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // 总是插入到最前面
    pub fn append(&mut self, token: DisplayToken) {
        self.tokens.push_front(token);
    }

    // 按从新到旧的顺序返回
    pub fn all(&self) -> Vec<DisplayToken> {
        self.tokens.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DisplayToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
