//! 服务模块

pub mod grading;
pub mod media;
pub mod practice;
pub mod weakness;

pub use grading::{
    AnswerSubmission, GradedAnswer, GradingService, SubmissionOutcome, create_grading_service,
};
pub use media::{MediaPipeline, create_media_pipeline};
pub use practice::{GenerateParams, PracticeService, create_practice_service};
pub use weakness::{WeaknessReport, WeaknessService, create_weakness_service};
