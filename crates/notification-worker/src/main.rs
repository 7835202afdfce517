//! 通知 worker 入口
//!
//! 装配数据库、Kafka、渠道投递器与消费者，监听退出信号后优雅关闭。

use std::collections::HashMap;
use std::sync::Arc;

use notification_worker::channels::{ChannelSender, DiscordSender, InAppSender};
use notification_worker::consumer::NotificationConsumer;
use notification_worker::dispatch::Dispatcher;
use notify_shared::config::AppConfig;
use notify_shared::database::Database;
use notify_shared::events::Channel;
use notify_shared::kafka::KafkaProducer;
use notify_shared::observability;
use notify_shared::store::NotificationStore;
use tokio::sync::watch;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 统一加载配置：config/{default,环境,服务}.toml 叠加环境变量
    let config = AppConfig::load("notification-worker").unwrap_or_default();
    observability::init(&config.observability)?;

    info!(
        environment = %config.environment,
        brokers = %config.kafka.brokers,
        "Starting notification-worker..."
    );

    // 初始化基础设施
    let db = Database::connect(&config.database).await?;
    let store = NotificationStore::new(db.pool().clone());
    let producer = KafkaProducer::new(&config.kafka)?;

    // 装配渠道投递器注册表
    let mut senders: HashMap<Channel, Arc<dyn ChannelSender>> = HashMap::new();
    senders.insert(Channel::InApp, Arc::new(InAppSender::new(store)));
    senders.insert(Channel::Discord, Arc::new(DiscordSender::new(&config.discord)?));

    if config.discord.endpoint.is_none() {
        info!("Discord 网关未配置，discord 渠道将以 no-op 方式运行");
    }

    let dispatcher = Arc::new(Dispatcher::new(senders));
    let consumer = NotificationConsumer::new(&config, dispatcher, producer)?;

    // 优雅关闭：Ctrl-C / SIGTERM 触发 watch 信号，消费循环处理完当前消息后退出
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "监听退出信号失败");
        }
        info!("收到退出信号，开始优雅关闭");
        let _ = shutdown_tx.send(true);
    });

    consumer.run(shutdown_rx).await?;

    db.close().await;
    info!("notification-worker 已退出");
    Ok(())
}
