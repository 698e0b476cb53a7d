//! 缓存层
//!
//! 提供统一的 `ObjectCache` 抽象，后端通过插件注册表在启动时选择。
//! 目前内置 Moka（内存）与 Redis 两种实现。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    /// 命中并取得值
    Found(T),
    /// 键不存在
    NotFound,
    /// 后端异常或值不可用，调用方应回退到数据源
    ExistsButNoValue,
}

/// 对象缓存统一接口
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// ttl 为 0 时使用后端默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 声明并注册一个缓存插件
///
/// 后端类型需要提供 `pub fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $backend:ty) => {
        #[ctor::ctor]
        fn __register_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let backend = <$backend>::new()
                            .map_err($crate::errors::CourseSystemError::cache_connection)?;
                        Ok(Box::new(backend) as Box<dyn $crate::cache::ObjectCache>)
                    })
                        as $crate::cache::register::BoxedObjectCacheFuture
                }),
            );
        }
    };
}
