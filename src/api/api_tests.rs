#[cfg(test)]
mod dto_tests {
    use crate::api::dto::grading_dto::SubmitAnswersRequest;
    use crate::api::dto::practice_dto::{GeneratePracticeRequest, QuestionView};
    use crate::models::question::{GeneratedQuestion, PracticeQuestion, QuestionType};

    fn sample_question() -> PracticeQuestion {
        PracticeQuestion::from_generated(
            "plan-1",
            GeneratedQuestion {
                question: "What is 2 + 2?".to_string(),
                question_type: QuestionType::MultipleChoice,
                topic: "arithmetic".to_string(),
                difficulty: Some(1),
                choices: Some(vec!["3".into(), "4".into(), "5".into()]),
                answer: "4".to_string(),
                explanation: "Basic addition".to_string(),
                image_prompt: None,
            },
            1,
            Some("images/abc.png".to_string()),
        )
    }

    #[test]
    fn test_question_view_hides_answer_and_hash() {
        let view = QuestionView::from(sample_question());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["question"], "What is 2 + 2?");
        assert_eq!(json["image_reference"], "images/abc.png");
        // 参考答案、解析与内容哈希绝不外露
        assert!(json.get("answer").is_none());
        assert!(json.get("explanation").is_none());
        assert!(json.get("content_hash").is_none());
        assert!(json.get("payload").is_none());
    }

    #[test]
    fn test_generate_request_defaults() {
        let request: GeneratePracticeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.count.is_none());
        assert!(request.difficulty.is_none());
        assert!(request.weakness_mode.is_none());

        let request: GeneratePracticeRequest =
            serde_json::from_str(r#"{"count": 3, "weakness_mode": true}"#).unwrap();
        assert_eq!(request.count, Some(3));
        assert_eq!(request.weakness_mode, Some(true));
    }

    #[test]
    fn test_submit_request_shape() {
        let request: SubmitAnswersRequest = serde_json::from_str(
            r#"{"answers": [{"question_id": "q-1", "answer": "4"}]}"#,
        )
        .unwrap();
        assert_eq!(request.answers.len(), 1);
        assert_eq!(request.answers[0].question_id, "q-1");

        let empty: SubmitAnswersRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.answers.is_empty());
    }
}

#[cfg(test)]
mod router_tests {
    use axum::{
        Router,
        http::{Request, StatusCode},
        routing::*,
    };
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_practice_route_shape() {
        let app = Router::new().route(
            "/api/v1/plans/:id/practice",
            post(|| async { (StatusCode::OK, r#"{"plan_id":"p1","questions":[],"count":0}"#) }),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/plans/p1/practice")
                    .header("Content-Type", "application/json")
                    .body(json!({"count": 3}).to_string())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_weakness_route_shape() {
        let app = Router::new().route(
            "/api/v1/plans/:id/weakness",
            get(|| async { (StatusCode::OK, r#"{"topics":[],"recommended":[]}"#) }),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/plans/p1/weakness")
                    .body(String::new())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
