//! 站内信渠道
//!
//! 将通知负载写入通知存储，Web API 侧由用户拉取。
//! 写库失败即该渠道失败；不做去重，消息重放会产生重复记录。

use async_trait::async_trait;
use notify_shared::events::{Channel, DeliveryPayload};
use notify_shared::store::{NewNotification, NotificationStore};
use tracing::{info, warn};

use super::{ChannelSender, DeliveryOutcome};
use crate::error::WorkerError;

/// 站内信投递器
pub struct InAppSender {
    store: NotificationStore,
}

impl InAppSender {
    pub fn new(store: NotificationStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ChannelSender for InAppSender {
    fn channel(&self) -> Channel {
        Channel::InApp
    }

    async fn send(&self, payload: &DeliveryPayload) -> Result<DeliveryOutcome, WorkerError> {
        let input = NewNotification {
            user_id: payload.user_id.clone(),
            notification_type: payload.notification_type,
            title: payload.title.clone(),
            message: payload.message.clone(),
            link: payload.link.clone(),
            metadata: payload.metadata.clone(),
        };

        match self.store.create(input).await {
            Ok(notification) => {
                info!(
                    channel = "in_app",
                    notification_id = %notification.id,
                    user_id = %payload.user_id,
                    notification_type = ?payload.notification_type,
                    "站内信已写入"
                );
                Ok(DeliveryOutcome::succeeded(Channel::InApp))
            }
            Err(e) => {
                warn!(
                    channel = "in_app",
                    user_id = %payload.user_id,
                    error = %e,
                    "站内信写入失败"
                );
                Ok(DeliveryOutcome::failed(Channel::InApp, e.to_string()))
            }
        }
    }
}
