//! 投递渠道
//!
//! 通过 `ChannelSender` trait 抽象投递行为，各渠道（站内信、Discord）
//! 提供独立实现。渠道内部的失败以结果条目的形式返回给分发器，
//! 新增渠道只需实现同一 trait 并注册到分发器。

use async_trait::async_trait;
use notify_shared::events::{Channel, DeliveryPayload};

use crate::error::WorkerError;

mod discord;
mod in_app;

pub use discord::DiscordSender;
pub use in_app::InAppSender;

/// 单渠道的投递结果
///
/// 分发器按请求顺序汇总各渠道的结果，失败渠道带上原因说明。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub channel: Channel,
    pub success: bool,
    pub error: Option<String>,
}

impl DeliveryOutcome {
    pub fn succeeded(channel: Channel) -> Self {
        Self {
            channel,
            success: true,
            error: None,
        }
    }

    pub fn failed(channel: Channel, error: impl Into<String>) -> Self {
        Self {
            channel,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// 渠道投递器 trait，各渠道实现具体的投递逻辑
#[async_trait]
pub trait ChannelSender: Send + Sync {
    /// 该投递器支持的渠道
    fn channel(&self) -> Channel;

    /// 投递一条通知
    ///
    /// 渠道内部的可预期失败（外部服务超时、写库失败）应返回
    /// `Ok(DeliveryOutcome::failed(..))` 而不是 Err——
    /// Err 保留给投递器自身无法继续工作的异常情况。
    async fn send(&self, payload: &DeliveryPayload) -> Result<DeliveryOutcome, WorkerError>;
}
