// Database and cache client layer

pub mod pool;
pub mod redis;

pub use pool::DbPool;
pub use redis::CacheClient;
