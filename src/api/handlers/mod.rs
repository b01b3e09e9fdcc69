//! API 处理器

pub mod grading_handler;
pub mod media_handler;
pub mod plan_handler;
pub mod practice_handler;
pub mod weakness_handler;
