//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use notify_shared::database::Database;
use notify_shared::store::NotificationStore;

/// Axum 应用共享状态
///
/// 数据库句柄用于就绪探针，仓储用于业务操作，两者底层共享同一连接池。
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub store: NotificationStore,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        let store = NotificationStore::new(db.pool().clone());
        Self { db, store }
    }
}
