//! 请求和响应的数据传输对象

use notify_shared::store::Notification;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// 请求
// ---------------------------------------------------------------------------

/// 通知列表查询参数
///
/// 越界值收敛到合法区间而不是报错，列表查询对边界宽容。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl ListQuery {
    /// 获取限制条数（1-100）
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, 100)
    }

    /// 获取偏移量（非负）
    pub fn offset(&self) -> i64 {
        self.offset.max(0)
    }
}

/// 标记已读请求
///
/// markAll 与 notificationId 二选一；都缺失时不执行任何操作。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    pub notification_id: Option<Uuid>,
    pub mark_all: Option<bool>,
}

// ---------------------------------------------------------------------------
// 响应
// ---------------------------------------------------------------------------

/// 通知列表响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub notifications: Vec<Notification>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// 未读计数 / 批量已读计数响应
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

/// 无操作提示响应
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
