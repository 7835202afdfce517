//! 调用方身份提取
//!
//! 令牌校验由上游网关完成，服务只信任网关注入的 `x-user-id` 请求头。
//! 缺少该请求头视为未认证请求。

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;

/// 经网关认证的调用方
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("缺少 x-user-id 请求头".to_string()))?;

        Ok(AuthUser {
            user_id: user_id.to_string(),
        })
    }
}
