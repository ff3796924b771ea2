#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{self, Request, StatusCode},
    };
    use bson::oid::ObjectId;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{error::AppError, models::debate::DebateResponse};

    use super::super::common::{create_test_debate, json_body, read_json, setup};

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(http::Method::POST)
            .uri(uri)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(json_body(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let ctx = setup().await;

        let response = ctx
            .app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_create_debate_then_fetch_it() {
        // Arrange
        let ctx = setup().await;
        let request = json!({
            "title": "Should AI write code?",
            "description": "Productivity versus craftsmanship",
            "tags": ["ai", "software"],
            "category": "Technology",
            "duration": 30
        });

        // Act
        let response = ctx
            .app
            .clone()
            .oneshot(post_json("/debates", &request))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: DebateResponse = read_json(response).await;
        let id = created.id.clone().expect("Created debate must have an ID");
        assert_eq!(created.tags, vec!["ai", "software"]);
        assert!(created.support.is_empty());
        assert!(created.oppose.is_empty());

        let response = ctx
            .app
            .oneshot(
                Request::builder()
                    .uri(format!("/debates/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let fetched: DebateResponse = read_json(response).await;
        assert_eq!(fetched.title, "Should AI write code?");
        assert_eq!(fetched.category, "Technology");
    }

    #[tokio::test]
    async fn test_list_debates_newest_first() {
        let ctx = setup().await;
        let older = create_test_debate(&ctx.store, "Older").await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let newer = create_test_debate(&ctx.store, "Newer").await;

        let response = ctx
            .app
            .oneshot(Request::builder().uri("/debates").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let debates: Vec<DebateResponse> = read_json(response).await;
        let ids: Vec<String> = debates.into_iter().filter_map(|d| d.id).collect();
        assert_eq!(
            ids,
            vec![newer.id.unwrap().to_hex(), older.id.unwrap().to_hex()]
        );
    }

    #[tokio::test]
    async fn test_create_debate_rejects_blank_title() {
        let ctx = setup().await;
        let request = json!({
            "title": "   ",
            "description": "d",
            "category": "c",
            "duration": 10
        });

        let response = ctx.app.oneshot(post_json("/debates", &request)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_json(response).await;
        assert_eq!(body["error"], "title is required");
    }

    #[tokio::test]
    async fn test_create_debate_rejects_missing_fields_and_bad_duration() {
        let ctx = setup().await;

        let missing = json!({ "title": "No description" });
        let response = ctx
            .app
            .clone()
            .oneshot(post_json("/debates", &missing))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_json(response).await;
        assert!(body["error"].is_string());

        let zero = json!({
            "title": "t",
            "description": "d",
            "category": "c",
            "duration": 0
        });
        let response = ctx.app.oneshot(post_json("/debates", &zero)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_unknown_debate_is_404() {
        let ctx = setup().await;

        for id in [ObjectId::new().to_hex(), "not-an-object-id".to_string()] {
            let response = ctx
                .app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri(format!("/debates/{}", id))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let body: Value = read_json(response).await;
            assert_eq!(body, json!({ "error": "Debate not found" }));
        }
    }

    #[tokio::test]
    async fn test_service_create_and_joined_lookup_validation() {
        let ctx = setup().await;
        let service = &ctx.services.debate_service;

        let created = service
            .create_debate(crate::models::debate::CreateDebateRequest {
                title: "Universal basic income".to_string(),
                description: "Funding and incentives".to_string(),
                tags: vec![],
                category: "Economics".to_string(),
                duration: 60,
            })
            .await
            .unwrap();
        let fetched = service
            .get_debate(&created.id.unwrap().to_hex())
            .await
            .unwrap();
        assert_eq!(fetched.title, "Universal basic income");
        assert_eq!(service.list_debates().await.unwrap().len(), 1);

        // Malformed and absent ids are both reported as missing
        assert!(matches!(
            service.get_debate("not-an-object-id").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.get_debate(&bson::oid::ObjectId::new().to_hex()).await,
            Err(AppError::NotFound(_))
        ));

        assert!(matches!(
            service.joined_debates(" ").await,
            Err(AppError::InvalidArgument(_))
        ));
        assert!(service.joined_debates("nobody").await.unwrap().is_empty());
    }
}
