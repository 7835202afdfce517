//! 通知消费者
//!
//! 从 Kafka 消费领域事件，经路由器映射后交给分发器投递。
//! 每条消息的处理被有界重试策略包裹，处理完成后才提交位点——
//! 位点提交不以投递成功为条件，失败只记录日志。
//! 全渠道投递失败的事件转发到死信队列供事后排查。

use std::sync::Arc;

use notify_shared::config::AppConfig;
use notify_shared::error::NotifyError;
use notify_shared::events::{Channel, EventType};
use notify_shared::kafka::{ConsumerMessage, KafkaConsumer, KafkaProducer, topics};
use notify_shared::retry::{RetryPolicy, retry_with_policy};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::dispatch::Dispatcher;
use crate::error::WorkerError;
use crate::router::EventRouter;

/// 当前固定的投递渠道策略
///
/// 渠道选择暂不依赖事件类型；列表形式保留，将来可按事件类型扩展。
const DELIVERY_CHANNELS: [Channel; 1] = [Channel::InApp];

/// 死信队列记录，保留来源 topic 便于定位重放入口
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeadLetterRecord<'a> {
    source_topic: &'a str,
    event: serde_json::Value,
}

/// 通知消费者
pub struct NotificationConsumer {
    consumer: KafkaConsumer,
    router: EventRouter,
    dispatcher: Arc<Dispatcher>,
    producer: KafkaProducer,
    retry_policy: RetryPolicy,
}

impl NotificationConsumer {
    pub fn new(
        config: &AppConfig,
        dispatcher: Arc<Dispatcher>,
        producer: KafkaProducer,
    ) -> Result<Self, WorkerError> {
        let consumer = KafkaConsumer::new(&config.kafka, Some("events"))?;
        Ok(Self {
            consumer,
            router: EventRouter::new(),
            dispatcher,
            producer,
            retry_policy: RetryPolicy::from_config(&config.worker),
        })
    }

    /// 启动消费循环，直到收到 shutdown 信号
    pub async fn run(self, shutdown: watch::Receiver<bool>) -> Result<(), WorkerError> {
        let subscribed: Vec<&str> = EventType::all().iter().map(|t| t.routing_key()).collect();
        self.consumer.subscribe(&subscribed)?;

        info!(topics = ?subscribed, "事件消费者已启动");

        let router = self.router;
        let dispatcher = self.dispatcher;
        let producer = self.producer;
        let retry_policy = self.retry_policy;

        self.consumer
            .start(shutdown, |msg| {
                let router = &router;
                let dispatcher = &dispatcher;
                let producer = &producer;
                let retry_policy = &retry_policy;
                async move {
                    let result = retry_with_policy(
                        retry_policy,
                        "handle_event",
                        |e| e.is_retryable(),
                        || async {
                            handle_message(router, dispatcher, producer, &msg)
                                .await
                                .map_err(NotifyError::from)
                        },
                    )
                    .await;

                    // 处理失败只记录日志，位点照常提交（至少一次消费契约）
                    if let Err(e) = result {
                        error!(
                            error = %e,
                            topic = %msg.topic,
                            partition = msg.partition,
                            offset = msg.offset,
                            "处理事件失败"
                        );
                    }
                    Ok(())
                }
            })
            .await;

        info!("事件消费者已停止");
        Ok(())
    }
}

/// 处理单条入站事件
///
/// 拆分为独立函数而非方法，便于在测试中直接调用而无需构造完整的 Consumer。
pub async fn handle_message(
    router: &EventRouter,
    dispatcher: &Dispatcher,
    producer: &KafkaProducer,
    msg: &ConsumerMessage,
) -> Result<(), WorkerError> {
    let Some(payload) = router.route(&msg.topic, &msg.payload)? else {
        return Ok(());
    };

    info!(
        topic = %msg.topic,
        user_id = %payload.user_id,
        notification_type = ?payload.notification_type,
        "事件已映射为通知"
    );

    let outcomes = dispatcher.deliver(&payload, &DELIVERY_CHANNELS).await;

    for outcome in &outcomes {
        if !outcome.success {
            warn!(
                topic = %msg.topic,
                channel = %outcome.channel,
                error = ?outcome.error,
                "渠道投递失败"
            );
        }
    }

    // 所有渠道都失败时转发到死信队列，便于后续排查或重放
    if !outcomes.is_empty() && outcomes.iter().all(|o| !o.success) {
        send_to_dlq(producer, msg, &payload.user_id).await;
    }

    info!(
        topic = %msg.topic,
        total_channels = outcomes.len(),
        success_count = outcomes.iter().filter(|o| o.success).count(),
        "事件处理完成"
    );

    Ok(())
}

/// 将全渠道失败的事件原样转发到死信队列
async fn send_to_dlq(producer: &KafkaProducer, msg: &ConsumerMessage, key: &str) {
    let event = match serde_json::from_slice(&msg.payload) {
        Ok(value) => value,
        Err(_) => serde_json::Value::Null,
    };

    let record = DeadLetterRecord {
        source_topic: &msg.topic,
        event,
    };

    if let Err(e) = producer
        .send_json(topics::DEAD_LETTER_QUEUE, key, &record)
        .await
    {
        error!(
            topic = %msg.topic,
            error = %e,
            "发送到死信队列失败，事件可能丢失"
        );
    }
}
