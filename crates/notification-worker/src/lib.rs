//! 通知 worker
//!
//! 从 Kafka 消费领域事件，经事件路由器映射为通知负载，
//! 再由分发器并行投递到各渠道（站内信、Discord）。

pub mod channels;
pub mod consumer;
pub mod dispatch;
pub mod error;
pub mod router;
