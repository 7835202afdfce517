//! 通知存储仓储层
//!
//! 封装通知记录在 PostgreSQL 中的全部读写操作。写路径由 worker 的
//! in_app 渠道调用，读路径与状态变更由 Web API 调用，
//! 两侧共用同一套 SQL 以保证语义一致。

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{NotifyError, Result};
use crate::events::{NotificationType, Timestamp};

// ---------------------------------------------------------------------------
// 模型
// ---------------------------------------------------------------------------

/// 通知记录
///
/// 与 notifications 表一一对应。`metadata` 保存触发事件特有的
/// 结构化数据（JSONB），存储层不解释其内容。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: Option<String>,
    pub link: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// 新建通知的写入参数
///
/// id 与 created_at 由存储层生成，调用方只提供业务字段。
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: String,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: Option<String>,
    pub link: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// NotificationStore
// ---------------------------------------------------------------------------

/// 通知仓储
///
/// 持有连接池的轻量句柄，Clone 开销仅为 Arc 计数。
#[derive(Clone)]
pub struct NotificationStore {
    pool: PgPool,
}

impl NotificationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 创建通知记录
    ///
    /// id 使用 UUIDv7，按时间有序，利于主键索引局部性。
    pub async fn create(&self, input: NewNotification) -> Result<Notification> {
        let id = Uuid::now_v7();

        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (id, user_id, type, title, message, link, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, type, title, message, link, metadata, is_read, created_at
            "#,
        )
        .bind(id)
        .bind(&input.user_id)
        .bind(input.notification_type)
        .bind(&input.title)
        .bind(&input.message)
        .bind(&input.link)
        .bind(&input.metadata)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    /// 分页查询某用户的通知，按创建时间倒序（最新在前）
    pub async fn list(&self, user_id: &str, limit: i64, offset: i64) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, type, title, message, link, metadata, is_read, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    /// 某用户的通知总数（分页响应中的 total）
    pub async fn count(&self, user_id: &str) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM notifications WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// 某用户的未读通知数
    pub async fn count_unread(&self, user_id: &str) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// 将单条通知标记为已读
    ///
    /// 先查归属再更新：通知不存在返回 NotFound，
    /// 归属于其他用户返回 Forbidden，已读则为无操作幂等返回。
    pub async fn mark_read(&self, id: Uuid, user_id: &str) -> Result<Notification> {
        let existing = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, type, title, message, link, metadata, is_read, created_at
            FROM notifications
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let existing = existing.ok_or_else(|| NotifyError::NotFound {
            entity: "notification".to_string(),
            id: id.to_string(),
        })?;

        if existing.user_id != user_id {
            return Err(NotifyError::Forbidden {
                operation: "mark_read".to_string(),
            });
        }

        if existing.is_read {
            return Ok(existing);
        }

        let updated = sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE id = $1
            RETURNING id, user_id, type, title, message, link, metadata, is_read, created_at
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// 将某用户全部未读通知标记为已读，返回受影响行数
    pub async fn mark_all_read(&self, user_id: &str) -> Result<u64> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE")
                .bind(user_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    /// 删除单条通知
    ///
    /// 与 mark_read 相同的归属校验：不存在 NotFound，非本人 Forbidden。
    pub async fn delete(&self, id: Uuid, user_id: &str) -> Result<()> {
        let owner: Option<(String,)> =
            sqlx::query_as("SELECT user_id FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let (owner,) = owner.ok_or_else(|| NotifyError::NotFound {
            entity: "notification".to_string(),
            id: id.to_string(),
        })?;

        if owner != user_id {
            return Err(NotifyError::Forbidden {
                operation: "delete".to_string(),
            });
        }

        sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// 测试（需要数据库）
// ---------------------------------------------------------------------------
