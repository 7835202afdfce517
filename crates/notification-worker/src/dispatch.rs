//! 投递分发器
//!
//! 按请求的渠道列表并行投递一条通知负载，汇总各渠道结果。
//! 单个渠道的失败不影响其他渠道，未注册的渠道产生失败结果而非中断。

use std::collections::HashMap;
use std::sync::Arc;

use notify_shared::events::{Channel, DeliveryPayload};
use tracing::{error, warn};

use crate::channels::{ChannelSender, DeliveryOutcome};

/// 投递分发器
///
/// 持有渠道到投递器的注册表，启动时装配完成后只读。
pub struct Dispatcher {
    senders: HashMap<Channel, Arc<dyn ChannelSender>>,
}

impl Dispatcher {
    pub fn new(senders: HashMap<Channel, Arc<dyn ChannelSender>>) -> Self {
        Self { senders }
    }

    /// 向指定渠道列表投递负载
    ///
    /// 使用 `join_all` 并行执行，返回结果与请求渠道一一对应且顺序一致。
    /// 投递器返回 Err 或渠道未注册时，对应位置是失败结果，其余渠道照常投递。
    pub async fn deliver(
        &self,
        payload: &DeliveryPayload,
        channels: &[Channel],
    ) -> Vec<DeliveryOutcome> {
        let futures: Vec<_> = channels
            .iter()
            .map(|&channel| async move {
                let Some(sender) = self.senders.get(&channel) else {
                    // 没有注册对应渠道的投递器
                    warn!(channel = %channel, "未找到该渠道的投递器，跳过");
                    return DeliveryOutcome::failed(channel, "Unknown channel");
                };

                match sender.send(payload).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        error!(channel = %channel, error = %e, "投递器执行异常");
                        DeliveryOutcome::failed(channel, e.to_string())
                    }
                }
            })
            .collect();

        futures::future::join_all(futures).await
    }
}
