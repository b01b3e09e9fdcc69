//! 存储模块

pub mod surrealdb;

pub use surrealdb::SurrealPool;
