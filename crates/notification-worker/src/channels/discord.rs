//! Discord 渠道
//!
//! 通过内部 Discord 机器人网关的 HTTP 接口发送私信 embed。
//! 未配置网关地址时降级为记录日志的空操作（本地开发常态），
//! 任何超时或非 2xx 响应都转化为该渠道的失败结果，不向外抛错。

use std::time::Duration;

use async_trait::async_trait;
use notify_shared::config::DiscordConfig;
use notify_shared::error::NotifyError;
use notify_shared::events::{Channel, DeliveryPayload, NotificationType};
use serde::Serialize;
use tracing::{info, warn};

use super::{ChannelSender, DeliveryOutcome};
use crate::error::WorkerError;

// ---------------------------------------------------------------------------
// 消息结构
// ---------------------------------------------------------------------------

/// 发往机器人网关的私信请求体
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DirectMessageRequest<'a> {
    user_id: &'a str,
    embed: Embed<'a>,
}

/// Discord embed 卡片
#[derive(Debug, Serialize)]
struct Embed<'a> {
    title: &'a str,
    description: &'a str,
    color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<EmbedField>>,
}

#[derive(Debug, Serialize)]
struct EmbedField {
    name: String,
    value: String,
}

/// 通知类型到 embed 颜色的固定映射
///
/// 绿=正向结果，红=拒绝/错误，琥珀=预警，蓝=信息，灰=其他。
fn embed_color(notification_type: NotificationType) -> u32 {
    use NotificationType::*;
    match notification_type {
        ClipApproved | CampaignAccepted | PaymentCompleted | PaymentCredited => 0x22C55E,
        ClipRejected | CampaignRejected | PaymentError => 0xEF4444,
        CampaignEnding | CampaignEnded | PaymentProcessing => 0xF59E0B,
        NewCampaign | StudioInvite | ClipMilestone => 0x3B82F6,
        SystemAlert | DiscordDisconnected | WalletNotConfigured | ProfileIncomplete => 0x6B7280,
    }
}

/// 从投递负载构造私信请求体，link 存在时作为附加字段展示
fn build_request(payload: &DeliveryPayload) -> DirectMessageRequest<'_> {
    let fields = payload.link.as_ref().map(|link| {
        vec![EmbedField {
            name: "Link".to_string(),
            value: link.clone(),
        }]
    });

    DirectMessageRequest {
        user_id: &payload.user_id,
        embed: Embed {
            title: &payload.title,
            description: payload.message.as_deref().unwrap_or(""),
            color: embed_color(payload.notification_type),
            fields,
        },
    }
}

// ---------------------------------------------------------------------------
// DiscordSender
// ---------------------------------------------------------------------------

/// Discord 私信投递器
pub struct DiscordSender {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl DiscordSender {
    /// 根据配置创建投递器
    ///
    /// 超时设置在 HTTP 客户端层面，覆盖连接与响应全程。
    pub fn new(config: &DiscordConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| NotifyError::Internal(format!("创建 HTTP 客户端失败: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl ChannelSender for DiscordSender {
    fn channel(&self) -> Channel {
        Channel::Discord
    }

    async fn send(&self, payload: &DeliveryPayload) -> Result<DeliveryOutcome, WorkerError> {
        // 未配置网关时按成功处理，避免本地环境被误报投递失败
        let Some(endpoint) = &self.endpoint else {
            info!(
                channel = "discord",
                user_id = %payload.user_id,
                title = %payload.title,
                "Discord 网关未配置，跳过发送"
            );
            return Ok(DeliveryOutcome::succeeded(Channel::Discord));
        };

        let request = build_request(payload);
        let url = format!("{endpoint}/messages/dm");

        match self.client.post(&url).json(&request).send().await {
            Ok(response) if response.status().is_success() => {
                info!(
                    channel = "discord",
                    user_id = %payload.user_id,
                    notification_type = ?payload.notification_type,
                    "Discord 私信已发送"
                );
                Ok(DeliveryOutcome::succeeded(Channel::Discord))
            }
            Ok(response) => {
                let status = response.status();
                warn!(
                    channel = "discord",
                    user_id = %payload.user_id,
                    status = %status,
                    "Discord 网关返回非成功状态"
                );
                Ok(DeliveryOutcome::failed(
                    Channel::Discord,
                    format!("网关返回状态 {status}"),
                ))
            }
            Err(e) => {
                warn!(
                    channel = "discord",
                    user_id = %payload.user_id,
                    error = %e,
                    "Discord 私信发送失败"
                );
                Ok(DeliveryOutcome::failed(Channel::Discord, e.to_string()))
            }
        }
    }
}
