//! 领域模型模块

pub mod attempt;
pub mod attempt_repository;
pub mod plan;
pub mod plan_repository;
pub mod question;
pub mod question_repository;

pub use attempt::{AttemptLog, WeaknessTopic};
pub use attempt_repository::{AttemptRepository, AttemptRepositoryImpl};
pub use plan::StudyPlan;
pub use plan_repository::{PlanRepository, PlanRepositoryImpl};
pub use question::{GeneratedQuestion, PracticeQuestion, QuestionType};
pub use question_repository::{QuestionRepository, QuestionRepositoryImpl};
