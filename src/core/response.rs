//! 核心响应处理模块

use serde::Serialize;

/// 没有实体可返回时的确认响应
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub id: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: id.into(),
        }
    }
}
