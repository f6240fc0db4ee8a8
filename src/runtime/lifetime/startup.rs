use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{ClassPointError, Result};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

async fn build_cache(name: &str) -> Option<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name)?;
    match constructor().await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", name);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to create {} cache: {}", name, e);
            None
        }
    }
}

/// 创建缓存实例
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = &AppConfig::get().cache.cache_type;

    warn!("Attempting to create {} cache backend", cache_type);

    if let Some(cache) = build_cache(cache_type).await {
        return Ok(cache);
    }

    // 配置的后端不可用时回退到内存缓存
    if cache_type != "moka" {
        warn!("Falling back to default memory cache");
        if let Some(cache) = build_cache("moka").await {
            return Ok(cache);
        }
    }

    Err(ClassPointError::cache_connection(format!(
        "No cache backend available (tried: {cache_type})"
    )))
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何用户，则创建一个 admin 账号；开发环境下输出其访问令牌
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@localhost".to_string());

    let admin_request = CreateUserRequest {
        username,
        email,
        role: UserRole::Admin,
        school_id: None,
        display_name: Some("Administrator".to_string()),
        professor_experience_enabled: false,
    };

    let user = match storage.create_user(admin_request).await {
        Ok(user) => user,
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
            return;
        }
    };

    info!(
        "Default admin account created successfully (ID: {}, username: {})",
        user.id, user.username
    );

    if AppConfig::get().is_development() {
        match JwtUtils::generate_access_token(user.id, UserRole::ADMIN) {
            Ok(token) => {
                warn!("==========================================================");
                warn!("  DEVELOPMENT ADMIN TOKEN (do not use in production)");
                warn!("  Bearer {}", token);
                warn!("==========================================================");
            }
            Err(e) => warn!("Failed to generate admin token: {}", e),
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储与缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    crate::cache::register_builtin_plugins();
    if cfg!(debug_assertions) {
        debug!(
            "Registered cache backends: {:?}",
            crate::cache::register::registered_plugin_names()
        );
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    seed_admin(&storage).await;

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}
