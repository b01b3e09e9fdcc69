use minerva::api::{self, app_state::AppState};
use minerva::cache::artifact_store::FsArtifactStore;
use minerva::cache::content_cache::SurrealContentCache;
use minerva::config::loader::ConfigLoader;
use minerva::genai::client::HttpGenerativeClient;
use minerva::models::attempt_repository::AttemptRepositoryImpl;
use minerva::models::plan_repository::PlanRepositoryImpl;
use minerva::models::question_repository::QuestionRepositoryImpl;
use minerva::observability::{ObservabilityState, create_observability_router};
use minerva::services::{
    create_grading_service, create_media_pipeline, create_practice_service,
    create_weakness_service,
};
use minerva::storage::surrealdb::SurrealPool;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting Minerva...");

    let config = ConfigLoader::load()?;
    ConfigLoader::validate(&config)?;
    info!("Configuration loaded successfully");

    let db_pool = SurrealPool::new(config.database.clone()).await?;
    info!("Database connection pool initialized");

    let db = db_pool.inner().await;
    let plan_repository = Arc::new(PlanRepositoryImpl::new(db.clone()));
    let question_repository = Arc::new(QuestionRepositoryImpl::new(db.clone()));
    let attempt_repository = Arc::new(AttemptRepositoryImpl::new(db.clone()));
    info!("Repositories initialized");

    let content_cache = Arc::new(SurrealContentCache::new(db));
    let artifact_store = Arc::new(FsArtifactStore::new(config.artifacts.data_dir.clone()));
    info!(
        "Artifact store initialized at {}",
        config.artifacts.data_dir.display()
    );

    let genai_client = Arc::new(HttpGenerativeClient::new(config.genai.clone())?);
    info!(
        "Generative backend client initialized: {}",
        config.genai.base_url
    );

    // 可观测性状态先于各服务创建，管线计数器共享同一份指标
    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
    ));
    let metrics = observability_state.metrics.clone();

    let media_pipeline = create_media_pipeline(
        content_cache,
        artifact_store,
        genai_client.clone(),
        metrics.clone(),
        config.genai.image_model.clone(),
        config.genai.speech_model.clone(),
    );
    let media_pipeline: Arc<dyn minerva::services::media::MediaPipeline> =
        Arc::from(media_pipeline);
    info!("Media pipeline initialized");

    let practice_service = create_practice_service(
        plan_repository.clone(),
        question_repository.clone(),
        attempt_repository.clone(),
        genai_client.clone(),
        media_pipeline.clone(),
        metrics.clone(),
        config.genai.max_parse_attempts,
    );
    info!("Practice service initialized");

    let grading_service = create_grading_service(
        plan_repository.clone(),
        question_repository.clone(),
        attempt_repository.clone(),
        genai_client.clone(),
        metrics,
        config.genai.max_parse_attempts,
    );
    info!("Grading service initialized");

    let weakness_service = create_weakness_service(
        plan_repository.clone(),
        question_repository.clone(),
        attempt_repository.clone(),
    );
    info!("Weakness service initialized");

    let app_state = AppState::new(
        db_pool.clone(),
        plan_repository,
        question_repository,
        attempt_repository,
        practice_service,
        grading_service,
        weakness_service,
        media_pipeline,
        config.security.clone(),
        config.genai.clone(),
    );
    info!("Application state created");

    let api_router = api::create_router(app_state);
    let router = create_observability_router(observability_state).merge(api_router);
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
