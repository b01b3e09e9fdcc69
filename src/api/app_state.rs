use crate::config::config::{GenAiConfig, SecurityConfig};
use crate::models::attempt_repository::AttemptRepository;
use crate::models::plan_repository::PlanRepository;
use crate::models::question_repository::QuestionRepository;
use crate::services::grading::GradingService;
use crate::services::media::MediaPipeline;
use crate::services::practice::PracticeService;
use crate::services::weakness::WeaknessService;
use crate::storage::surrealdb::SurrealPool;
use std::sync::Arc;

/// Application state containing all shared services
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SurrealPool,
    /// Plan repository for study plan CRUD operations
    pub plan_repository: Arc<dyn PlanRepository>,
    /// Question repository for question persistence and dedup
    pub question_repository: Arc<dyn QuestionRepository>,
    /// Attempt repository for attempt logs and weakness aggregates
    pub attempt_repository: Arc<dyn AttemptRepository>,
    /// Practice service for question generation
    pub practice_service: Arc<dyn PracticeService>,
    /// Grading service for answer submissions
    pub grading_service: Arc<dyn GradingService>,
    /// Weakness service for history analysis
    pub weakness_service: Arc<dyn WeaknessService>,
    /// Media pipeline for cached speech/image synthesis
    pub media_pipeline: Arc<dyn MediaPipeline>,
    /// Security settings for the identity middleware
    pub security: Arc<SecurityConfig>,
    /// Generative backend settings (default voice etc.)
    pub genai_config: Arc<GenAiConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db_pool", &"SurrealPool")
            .field("plan_repository", &"Arc<dyn PlanRepository>")
            .field("question_repository", &"Arc<dyn QuestionRepository>")
            .field("attempt_repository", &"Arc<dyn AttemptRepository>")
            .field("practice_service", &"Arc<dyn PracticeService>")
            .field("grading_service", &"Arc<dyn GradingService>")
            .field("weakness_service", &"Arc<dyn WeaknessService>")
            .field("media_pipeline", &"Arc<dyn MediaPipeline>")
            .field("security", &self.security)
            .field("genai_config", &"Arc<GenAiConfig>")
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        db_pool: SurrealPool,
        plan_repository: Arc<dyn PlanRepository>,
        question_repository: Arc<dyn QuestionRepository>,
        attempt_repository: Arc<dyn AttemptRepository>,
        practice_service: Box<dyn PracticeService>,
        grading_service: Box<dyn GradingService>,
        weakness_service: Box<dyn WeaknessService>,
        media_pipeline: Arc<dyn MediaPipeline>,
        security: SecurityConfig,
        genai_config: GenAiConfig,
    ) -> Self {
        Self {
            db_pool,
            plan_repository,
            question_repository,
            attempt_repository,
            practice_service: Arc::from(practice_service),
            grading_service: Arc::from(grading_service),
            weakness_service: Arc::from(weakness_service),
            media_pipeline,
            security: Arc::new(security),
            genai_config: Arc::new(genai_config),
        }
    }
}
