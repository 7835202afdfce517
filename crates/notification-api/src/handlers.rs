//! HTTP 请求处理器
//!
//! 所有端点的身份来自 `AuthUser` 提取器，存储层负责归属校验，
//! handler 只做参数整理和响应组装。

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::dto::{CountResponse, ListQuery, ListResponse, MarkReadRequest, MessageResponse};
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// GET /notifications — 分页列出调用方的通知，最新在前
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>> {
    let limit = query.limit();
    let offset = query.offset();

    let notifications = state.store.list(&user.user_id, limit, offset).await?;
    let total = state.store.count(&user.user_id).await?;

    Ok(Json(ListResponse {
        notifications,
        total,
        limit,
        offset,
    }))
}

/// GET /notifications/unread-count — 调用方的未读通知数
pub async fn unread_count(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<CountResponse>> {
    let count = state.store.count_unread(&user.user_id).await?;
    Ok(Json(CountResponse { count }))
}

/// POST /notifications/mark-read — 标记已读
///
/// markAll 优先于单条 id；两者都缺失时返回无操作提示而不是报错。
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<MarkReadRequest>,
) -> Result<Response> {
    if request.mark_all == Some(true) {
        let affected = state.store.mark_all_read(&user.user_id).await?;
        info!(user_id = %user.user_id, affected, "全部通知已标记已读");
        return Ok(Json(CountResponse {
            count: affected as i64,
        })
        .into_response());
    }

    if let Some(id) = request.notification_id {
        let notification = state.store.mark_read(id, &user.user_id).await?;
        return Ok(Json(notification).into_response());
    }

    Ok(Json(MessageResponse {
        message: "No action taken",
    })
    .into_response())
}

/// DELETE /notifications/{id} — 删除单条通知
pub async fn delete_notification(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.store.delete(id, &user.user_id).await?;
    info!(user_id = %user.user_id, notification_id = %id, "通知已删除");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /health — 存活探针
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /ready — 就绪探针，校验数据库连通性
pub async fn ready(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    state
        .db
        .health_check()
        .await
        .map_err(|e| ApiError::Internal(format!("数据库未就绪: {e}")))?;

    Ok(Json(serde_json::json!({ "status": "ready" })))
}
