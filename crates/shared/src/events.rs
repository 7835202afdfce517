//! 事件模型与通知类型定义
//!
//! 定义进入通知系统的全部领域事件类型、各事件的结构化负载，
//! 以及通知记录相关的枚举。事件负载按 routing key 区分，
//! 字段采用 camelCase 与上游服务的 JSON 约定保持一致。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EventType — 入站事件类型
// ---------------------------------------------------------------------------

/// 入站领域事件类型
///
/// 固定集合，每种事件对应一个 Kafka topic（见 `kafka::topics`），
/// 由事件路由器绑定一个确定性的映射函数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    ClipApproved,
    ClipRejected,
    CampaignStatusChanged,
    CampaignEnded,
    PayoutCompleted,
    DisputeCreated,
    DisputeResolved,
}

impl EventType {
    /// 事件对应的 routing key（即 topic 名称）
    pub fn routing_key(&self) -> &'static str {
        match self {
            Self::ClipApproved => "clip.approved",
            Self::ClipRejected => "clip.rejected",
            Self::CampaignStatusChanged => "campaign.status_changed",
            Self::CampaignEnded => "campaign.ended",
            Self::PayoutCompleted => "payment.payout_completed",
            Self::DisputeCreated => "dispute.created",
            Self::DisputeResolved => "dispute.resolved",
        }
    }

    /// 按 routing key 反查事件类型
    pub fn from_routing_key(key: &str) -> Option<Self> {
        match key {
            "clip.approved" => Some(Self::ClipApproved),
            "clip.rejected" => Some(Self::ClipRejected),
            "campaign.status_changed" => Some(Self::CampaignStatusChanged),
            "campaign.ended" => Some(Self::CampaignEnded),
            "payment.payout_completed" => Some(Self::PayoutCompleted),
            "dispute.created" => Some(Self::DisputeCreated),
            "dispute.resolved" => Some(Self::DisputeResolved),
            _ => None,
        }
    }

    /// 全部支持的事件类型，消费端用于批量订阅
    pub fn all() -> [Self; 7] {
        [
            Self::ClipApproved,
            Self::ClipRejected,
            Self::CampaignStatusChanged,
            Self::CampaignEnded,
            Self::PayoutCompleted,
            Self::DisputeCreated,
            Self::DisputeResolved,
        ]
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.routing_key())
    }
}

// ---------------------------------------------------------------------------
// 事件负载
// ---------------------------------------------------------------------------

/// 切片审核通过事件
///
/// payment_amount 为最小货币单位（分）的整数，展示时除以 100。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipApprovedEvent {
    pub user_id: String,
    pub clip_id: String,
    pub campaign_id: Option<String>,
    pub payment_amount: i64,
}

/// 切片审核拒绝事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipRejectedEvent {
    pub user_id: String,
    pub clip_id: String,
    pub reason: String,
}

/// 活动状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
    Cancelled,
}

/// 活动状态变更事件
///
/// changed_by 可能缺失（系统触发的状态流转），
/// 此时不产生通知。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignStatusChangedEvent {
    pub campaign_id: String,
    pub campaign_name: Option<String>,
    pub new_status: CampaignStatus,
    pub changed_by: Option<String>,
}

/// 活动结束事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignEndedEvent {
    pub campaign_id: String,
    pub reason: String,
    pub total_clips: i64,
    pub total_views: i64,
}

/// 结算完成事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutCompletedEvent {
    pub user_id: String,
    pub payout_id: String,
    pub amount: i64,
}

/// 争议创建事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeCreatedEvent {
    pub user_id: String,
    pub dispute_id: String,
    pub clip_id: Option<String>,
}

/// 争议处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisputeResolution {
    Resolved,
    Rejected,
}

/// 争议解决事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisputeResolvedEvent {
    pub user_id: String,
    pub dispute_id: String,
    pub resolution: DisputeResolution,
}

// ---------------------------------------------------------------------------
// NotificationType / Channel
// ---------------------------------------------------------------------------

/// 通知类型
///
/// 封闭枚举，序列化为 SCREAMING_SNAKE_CASE 与客户端约定一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    ClipApproved,
    ClipRejected,
    CampaignAccepted,
    CampaignRejected,
    CampaignEnding,
    CampaignEnded,
    NewCampaign,
    StudioInvite,
    ClipMilestone,
    PaymentCompleted,
    PaymentCredited,
    PaymentProcessing,
    PaymentError,
    SystemAlert,
    DiscordDisconnected,
    WalletNotConfigured,
    ProfileIncomplete,
}

/// 投递渠道标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    InApp,
    Discord,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InApp => "in_app",
            Self::Discord => "discord",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// DeliveryPayload — 投递单元
// ---------------------------------------------------------------------------

/// 投递负载
///
/// 事件路由器产出的规范化投递单元，每条入站事件新建一份，
/// 投递尝试结束后即丢弃，不做持久化。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPayload {
    pub user_id: String,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: Option<String>,
    pub link: Option<String>,
    /// 触发事件特有的结构化数据，核心不解释其内容
    pub metadata: Option<serde_json::Value>,
}

impl DeliveryPayload {
    pub fn new(
        user_id: impl Into<String>,
        notification_type: NotificationType,
        title: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            notification_type,
            title: title.into(),
            message: None,
            link: None,
            metadata: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

// ---------------------------------------------------------------------------
// 金额格式化
// ---------------------------------------------------------------------------

/// 将最小货币单位（分）的整数金额格式化为两位小数的美元字符串
///
/// 例：2550 -> "$25.50"
pub fn format_amount_minor(amount: i64) -> String {
    format!("${}.{:02}", amount / 100, (amount % 100).abs())
}

/// 通知记录的时间戳类型别名，便于统一调整精度
pub type Timestamp = DateTime<Utc>;

// ---------------------------------------------------------------------------
// 单元测试
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_key_round_trip() {
        for event_type in EventType::all() {
            let key = event_type.routing_key();
            assert_eq!(EventType::from_routing_key(key), Some(event_type));
        }
        assert_eq!(EventType::from_routing_key("clip.unknown"), None);
    }

    #[test]
    fn test_event_type_display() {
        assert_eq!(EventType::ClipApproved.to_string(), "clip.approved");
        assert_eq!(
            EventType::PayoutCompleted.to_string(),
            "payment.payout_completed"
        );
    }

    #[test]
    fn test_clip_approved_event_camel_case() {
        let event = ClipApprovedEvent {
            user_id: "user-001".to_string(),
            clip_id: "clip-042".to_string(),
            campaign_id: Some("camp-007".to_string()),
            payment_amount: 2550,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("userId"));
        assert!(json.contains("clipId"));
        assert!(json.contains("paymentAmount"));

        let back: ClipApprovedEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.payment_amount, 2550);
    }

    #[test]
    fn test_campaign_status_deserialize() {
        let event: CampaignStatusChangedEvent = serde_json::from_str(
            r#"{"campaignId":"camp-1","newStatus":"PAUSED","changedBy":"user-9"}"#,
        )
        .unwrap();
        assert_eq!(event.new_status, CampaignStatus::Paused);
        assert_eq!(event.changed_by.as_deref(), Some("user-9"));

        // changedBy 缺失时应反序列化为 None 而不是报错
        let event: CampaignStatusChangedEvent =
            serde_json::from_str(r#"{"campaignId":"camp-1","newStatus":"ACTIVE"}"#).unwrap();
        assert_eq!(event.new_status, CampaignStatus::Active);
        assert!(event.changed_by.is_none());
    }

    #[test]
    fn test_notification_type_serialize() {
        let json = serde_json::to_string(&NotificationType::ClipApproved).unwrap();
        assert_eq!(json, "\"CLIP_APPROVED\"");

        let json = serde_json::to_string(&NotificationType::WalletNotConfigured).unwrap();
        assert_eq!(json, "\"WALLET_NOT_CONFIGURED\"");
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::InApp.to_string(), "in_app");
        assert_eq!(Channel::Discord.to_string(), "discord");
    }

    #[test]
    fn test_channel_serde() {
        assert_eq!(serde_json::to_string(&Channel::InApp).unwrap(), "\"in_app\"");
        let back: Channel = serde_json::from_str("\"discord\"").unwrap();
        assert_eq!(back, Channel::Discord);
    }

    #[test]
    fn test_delivery_payload_builder() {
        let payload = DeliveryPayload::new("user-1", NotificationType::ClipApproved, "Clip Approved")
            .with_message("Your clip has been approved!")
            .with_link("/clips/clip-42")
            .with_metadata(serde_json::json!({"clipId": "clip-42"}));

        assert_eq!(payload.user_id, "user-1");
        assert_eq!(payload.title, "Clip Approved");
        assert!(payload.message.is_some());
        assert!(payload.link.is_some());
        assert!(payload.metadata.is_some());
    }

    #[test]
    fn test_format_amount_minor() {
        assert_eq!(format_amount_minor(2550), "$25.50");
        assert_eq!(format_amount_minor(100), "$1.00");
        assert_eq!(format_amount_minor(5), "$0.05");
        assert_eq!(format_amount_minor(0), "$0.00");
        assert_eq!(format_amount_minor(123456), "$1234.56");
    }
}
