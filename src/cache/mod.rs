//! 对象缓存
//!
//! 目前仅缓存已认证用户（键为 `user:{token}`），值以 JSON 字符串保存。

pub mod object_cache;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;

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

/// 已认证用户的缓存键
pub fn user_cache_key(token: &str) -> String {
    format!("user:{token}")
}

/// 按配置创建对象缓存
pub async fn create_object_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache = object_cache::moka::MokaCacheWrapper::new()?;
    Ok(Arc::new(cache))
}
