//! 统一错误处理模块
//!
//! 定义系统中所有共享的错误类型，使用 thiserror 提供良好的错误信息。
//! 渠道投递的失败不走错误通道——分发器将其表达为结果条目，
//! 这里只保留代码实际会产生的错误形态。

use thiserror::Error;

/// 系统错误类型
#[derive(Debug, Error)]
pub enum NotifyError {
    // ==================== 数据库错误 ====================
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("记录未找到: {entity} id={id}")]
    NotFound { entity: String, id: String },

    // ==================== 权限错误 ====================
    #[error("权限不足: {operation}")]
    Forbidden { operation: String },

    // ==================== 验证错误 ====================
    #[error("参数验证失败: {0}")]
    Validation(String),

    // ==================== Kafka 错误 ====================
    #[error("Kafka 错误: {0}")]
    Kafka(String),

    // ==================== 通用错误 ====================
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, NotifyError>;

impl NotifyError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Kafka(_) => "KAFKA_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为可重试错误
    ///
    /// 业务层错误（NotFound/Forbidden/Validation）重试没有意义，
    /// 只有基础设施层的瞬时故障才值得重试。
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Kafka(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = NotifyError::NotFound {
            entity: "notification".to_string(),
            id: "abc".to_string(),
        };
        assert_eq!(err.code(), "NOT_FOUND");

        let err = NotifyError::Kafka("broker down".to_string());
        assert_eq!(err.code(), "KAFKA_ERROR");
    }

    #[test]
    fn test_is_retryable() {
        let db_err = NotifyError::Database(sqlx::Error::PoolTimedOut);
        assert!(db_err.is_retryable());

        let kafka_err = NotifyError::Kafka("broker down".to_string());
        assert!(kafka_err.is_retryable());

        let forbidden = NotifyError::Forbidden {
            operation: "delete".to_string(),
        };
        assert!(!forbidden.is_retryable());

        let validation = NotifyError::Validation("字段缺失".to_string());
        assert!(!validation.is_retryable());
    }

    #[test]
    fn test_display_contains_context() {
        let err = NotifyError::NotFound {
            entity: "notification".to_string(),
            id: "n-42".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("notification"));
        assert!(msg.contains("n-42"));
    }
}
