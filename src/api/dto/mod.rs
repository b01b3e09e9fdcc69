//! API 数据传输对象

pub mod grading_dto;
pub mod media_dto;
pub mod plan_dto;
pub mod practice_dto;
pub mod weakness_dto;
