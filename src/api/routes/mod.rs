//! API 路由

pub mod media_routes;
pub mod plan_routes;
pub mod practice_routes;
pub mod weakness_routes;
