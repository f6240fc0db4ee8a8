//! 对象缓存
//!
//! 目前只用于缓存已认证用户（键为 `user:{token}`），后端通过插件注册表按名称构造。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 注册内置缓存后端
pub fn register_builtin_plugins() {
    object_cache::moka::register_plugin();
}

/// 为缓存后端生成插件注册函数
///
/// 后端类型需实现 `new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        pub fn register_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        let cache: $crate::errors::Result<Box<dyn $crate::cache::ObjectCache>> =
                            <$ty>::new()
                                .map(|cache| Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                                .map_err($crate::errors::ClassPointError::cache_connection);
                        cache
                    })
                }),
            );
        }
    };
}
