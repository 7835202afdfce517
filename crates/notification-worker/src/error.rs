//! worker 错误类型
//!
//! 渠道内的投递失败以 `DeliveryOutcome` 的形式返回，不在这里建模；
//! 该枚举只覆盖消息处理链路真实会抛出的错误。

use notify_shared::error::NotifyError;
use thiserror::Error;

/// worker 处理错误
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("事件反序列化失败: {0}")]
    DeserializationFailed(String),

    #[error(transparent)]
    Shared(#[from] NotifyError),
}

impl From<WorkerError> for NotifyError {
    /// 折叠进共享错误域，供共享层的重试执行器判断可重试性
    fn from(err: WorkerError) -> Self {
        match err {
            WorkerError::DeserializationFailed(msg) => NotifyError::Validation(msg),
            WorkerError::Shared(e) => e,
        }
    }
}

impl WorkerError {
    /// 是否为可重试错误
    ///
    /// 反序列化失败是确定性错误，重放同一消息必然再次失败；
    /// 只有共享层的瞬时故障才走重试路径。
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::DeserializationFailed(_) => false,
            Self::Shared(e) => e.is_retryable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialization_not_retryable() {
        let err = WorkerError::DeserializationFailed("bad json".to_string());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_shared_retryable_passthrough() {
        let err = WorkerError::Shared(NotifyError::Kafka("broker down".to_string()));
        assert!(err.is_retryable());

        let err = WorkerError::Shared(NotifyError::Validation("bad input".to_string()));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_folds_into_shared_error() {
        let err: NotifyError = WorkerError::DeserializationFailed("bad json".to_string()).into();
        assert!(matches!(err, NotifyError::Validation(_)));
        assert!(!err.is_retryable());

        let err: NotifyError =
            WorkerError::Shared(NotifyError::Kafka("broker down".to_string())).into();
        assert!(matches!(err, NotifyError::Kafka(_)));
        assert!(err.is_retryable());
    }
}
