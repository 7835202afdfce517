//! 事件路由器
//!
//! 将入站领域事件映射为通知负载。每种事件对应一个纯映射函数，
//! 返回 `None` 表示该事件不产生通知（如不关心的活动状态流转）。
//! 映射函数不依赖任何外部资源，可脱离消息队列直接测试。

use notify_shared::events::{
    CampaignEndedEvent, CampaignStatus, CampaignStatusChangedEvent, ClipApprovedEvent,
    ClipRejectedEvent, DeliveryPayload, DisputeCreatedEvent, DisputeResolution,
    DisputeResolvedEvent, EventType, NotificationType, PayoutCompletedEvent, format_amount_minor,
};
use serde_json::json;
use tracing::debug;

use crate::error::WorkerError;

// ---------------------------------------------------------------------------
// 各事件的映射函数
// ---------------------------------------------------------------------------

/// 切片审核通过 → 通知作者并附上收益金额
pub fn map_clip_approved(event: &ClipApprovedEvent) -> Option<DeliveryPayload> {
    let payload = DeliveryPayload::new(
        &event.user_id,
        NotificationType::ClipApproved,
        "Clip Approved",
    )
    .with_message(format!(
        "Your clip earned {}",
        format_amount_minor(event.payment_amount)
    ))
    .with_link(format!("/clips/{}", event.clip_id))
    .with_metadata(json!({
        "clipId": event.clip_id,
        "campaignId": event.campaign_id,
        "paymentAmount": event.payment_amount,
    }));

    Some(payload)
}

/// 切片审核拒绝 → 通知作者并说明原因
pub fn map_clip_rejected(event: &ClipRejectedEvent) -> Option<DeliveryPayload> {
    let payload = DeliveryPayload::new(
        &event.user_id,
        NotificationType::ClipRejected,
        "Clip Rejected",
    )
    .with_message(format!("Your clip was rejected: {}", event.reason))
    .with_link(format!("/clips/{}", event.clip_id))
    .with_metadata(json!({
        "clipId": event.clip_id,
        "reason": event.reason,
    }));

    Some(payload)
}

/// 活动状态变更 → 仅关心"被暂停且有操作人"的情形
///
/// 其余状态流转（上线、完成、取消）由别的事件或产品面承载，不产生通知。
pub fn map_campaign_status_changed(event: &CampaignStatusChangedEvent) -> Option<DeliveryPayload> {
    if event.new_status != CampaignStatus::Paused {
        return None;
    }

    let changed_by = event.changed_by.as_ref()?;

    let campaign_name = event.campaign_name.as_deref().unwrap_or("your campaign");

    let payload = DeliveryPayload::new(
        changed_by,
        NotificationType::CampaignEnding,
        "Campaign Paused",
    )
    .with_message(format!("Campaign \"{campaign_name}\" has been paused"))
    .with_link(format!("/campaigns/{}", event.campaign_id))
    .with_metadata(json!({
        "campaignId": event.campaign_id,
        "newStatus": "PAUSED",
    }));

    Some(payload)
}

/// 活动结束 → 面向 system 账户的系统告警
///
/// 事件中没有接收人信息，上游尚未提供活动所有者字段，
/// 暂以 system 账户为收件人占位。
pub fn map_campaign_ended(event: &CampaignEndedEvent) -> Option<DeliveryPayload> {
    let payload = DeliveryPayload::new("system", NotificationType::SystemAlert, "Campaign Ended")
        .with_message(format!(
            "Campaign ended ({}): {} clips, {} views",
            event.reason, event.total_clips, event.total_views
        ))
        .with_link(format!("/campaigns/{}", event.campaign_id))
        .with_metadata(json!({
            "campaignId": event.campaign_id,
            "reason": event.reason,
            "totalClips": event.total_clips,
            "totalViews": event.total_views,
        }));

    Some(payload)
}

/// 结算完成 → 通知收款人并附上金额
pub fn map_payout_completed(event: &PayoutCompletedEvent) -> Option<DeliveryPayload> {
    let payload = DeliveryPayload::new(
        &event.user_id,
        NotificationType::PaymentCompleted,
        "Payment Completed",
    )
    .with_message(format!(
        "Your payout of {} has been completed",
        format_amount_minor(event.amount)
    ))
    .with_link("/payouts")
    .with_metadata(json!({
        "payoutId": event.payout_id,
        "amount": event.amount,
    }));

    Some(payload)
}

/// 争议创建 → 系统告警，提醒用户关注处理进展
pub fn map_dispute_created(event: &DisputeCreatedEvent) -> Option<DeliveryPayload> {
    let payload = DeliveryPayload::new(
        &event.user_id,
        NotificationType::SystemAlert,
        "Dispute Created",
    )
    .with_message("A dispute has been opened on your clip".to_string())
    .with_link(format!("/disputes/{}", event.dispute_id))
    .with_metadata(json!({
        "disputeId": event.dispute_id,
        "clipId": event.clip_id,
    }));

    Some(payload)
}

/// 争议解决 → 按处理结果分支措辞
pub fn map_dispute_resolved(event: &DisputeResolvedEvent) -> Option<DeliveryPayload> {
    let message = match event.resolution {
        DisputeResolution::Resolved => "Your dispute has been resolved in your favor",
        DisputeResolution::Rejected => "Your dispute has been rejected",
    };

    let payload = DeliveryPayload::new(
        &event.user_id,
        NotificationType::SystemAlert,
        "Dispute Resolved",
    )
    .with_message(message.to_string())
    .with_link(format!("/disputes/{}", event.dispute_id))
    .with_metadata(json!({
        "disputeId": event.dispute_id,
        "resolution": event.resolution,
    }));

    Some(payload)
}

// ---------------------------------------------------------------------------
// EventRouter
// ---------------------------------------------------------------------------

/// 事件路由器
///
/// 按 topic 反序列化并应用对应的映射函数。无状态，可自由 Clone。
#[derive(Debug, Clone, Default)]
pub struct EventRouter;

impl EventRouter {
    pub fn new() -> Self {
        Self
    }

    /// 处理一条入站事件
    ///
    /// 返回 `Ok(None)` 表示事件有效但不产生通知；
    /// 未知 topic 与反序列化失败返回 Err，由消费端记录后继续。
    pub fn route(&self, topic: &str, payload: &[u8]) -> Result<Option<DeliveryPayload>, WorkerError> {
        let event_type = EventType::from_routing_key(topic).ok_or_else(|| {
            WorkerError::DeserializationFailed(format!("未知的事件 topic: {topic}"))
        })?;

        let deliver = match event_type {
            EventType::ClipApproved => map_clip_approved(&deserialize(payload)?),
            EventType::ClipRejected => map_clip_rejected(&deserialize(payload)?),
            EventType::CampaignStatusChanged => {
                map_campaign_status_changed(&deserialize(payload)?)
            }
            EventType::CampaignEnded => map_campaign_ended(&deserialize(payload)?),
            EventType::PayoutCompleted => map_payout_completed(&deserialize(payload)?),
            EventType::DisputeCreated => map_dispute_created(&deserialize(payload)?),
            EventType::DisputeResolved => map_dispute_resolved(&deserialize(payload)?),
        };

        if deliver.is_none() {
            debug!(topic, "事件不产生通知");
        }

        Ok(deliver)
    }
}

fn deserialize<T: serde::de::DeserializeOwned>(payload: &[u8]) -> Result<T, WorkerError> {
    serde_json::from_slice(payload).map_err(|e| WorkerError::DeserializationFailed(e.to_string()))
}

// ---------------------------------------------------------------------------
// 单元测试
// ---------------------------------------------------------------------------
