use anyhow::Result;
use foodtein_client::app::chat_use_case::ChatService;
use foodtein_client::app::payload::build_payload;
use foodtein_client::app::ports::ConversationBackend;
use foodtein_client::config::BackendConfig;
use foodtein_client::conversation::{ConnectionStatus, MessageRole};
use foodtein_client::infra::ReqwestBackend;
use foodtein_client::session::Session;
use foodtein_client::{Assistant, ClientError};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> BackendConfig {
    BackendConfig {
        base_url: format!("{}/api", server.uri()),
        ..Default::default()
    }
}

fn exchange_body() -> Value {
    json!({
        "conversation_uuid": "conv-1",
        "user_message": {"uuid": "m1", "role": 0, "content": "hello", "created_at": "2026-02-10T09:00:00Z"},
        "assistant_message": {
            "uuid": "m2",
            "role": 1,
            "content": "Hi! How can I help?",
            "created_at": "2026-02-10T09:00:02Z",
            "input_tokens": 120,
            "output_tokens": 15
        }
    })
}

#[tokio::test]
async fn test_fetch_conversation_sends_auth_headers() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ai-nutritionist/conversation"))
        .and(header("authorization", "Bearer bearer streamlit"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uuid": "conv-1",
            "messages": [{"role": 1, "content": "Welcome back", "created_at": "2026-02-10T08:59:00Z"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(&config_for(&server), Assistant::Nutritionist)?;
    let conversation = backend.fetch_conversation().await?;

    assert_eq!(conversation.uuid.as_deref(), Some("conv-1"));
    assert_eq!(conversation.messages[0].role, MessageRole::Assistant);
    assert_eq!(conversation.messages[0].display_time(), "08:59:00");
    Ok(())
}

#[tokio::test]
async fn test_coach_send_with_data_posts_normalized_tables() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ai-coach/conversation/messages-with-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(exchange_body()))
        .expect(1)
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(&config_for(&server), Assistant::Coach)?;
    let mut session = Session::new(Assistant::Coach);
    session.load_samples();
    session.profile.name = "Sam".into();
    session.profile.age = 34;
    session.profile.gender = "Other".into();
    session.profile.height = 172.0;
    session.profile.weight = 68.5;

    ChatService::new(&backend, &mut session, 7).send("  plan my week ").await?;
    assert_eq!(session.messages.len(), 2);
    assert_eq!(session.total_input_tokens, 120);
    assert_eq!(session.conversation_uuid.as_deref(), Some("conv-1"));

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body)?;
    assert_eq!(body["message"], json!("plan my week"));
    assert_eq!(body["age"], json!(34));
    assert_eq!(body["health_data"].as_array().unwrap().len(), 2);
    assert_eq!(body["workout_history"].as_array().unwrap().len(), 5);
    assert_eq!(body["workout_history"][0]["started_at"], json!("2026-02-06T00:00:00Z"));
    assert_eq!(body["available_workouts"].as_array().unwrap().len(), 5);
    assert!(body.get("dietary_data").is_none());
    Ok(())
}

#[tokio::test]
async fn test_nutritionist_payload_matches_wire_body() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ai-nutritionist/conversation/messages-with-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(exchange_body()))
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(&config_for(&server), Assistant::Nutritionist)?;
    let mut session = Session::new(Assistant::Nutritionist);
    session.load_samples();
    session.profile.dietary_types = vec!["Halal".into(), "Vegan".into()];
    let payload = build_payload(&session, "hello", 7);
    backend.send_message_with_data(&payload).await?;

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body)?;
    assert_eq!(body, serde_json::to_value(&payload)?);
    assert_eq!(body["dietary_type"], json!("Halal, Vegan"));
    Ok(())
}

#[tokio::test]
async fn test_status_codes_map_to_errors() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ai-nutritionist/conversation/messages"))
        .respond_with(ResponseTemplate::new(400).set_body_string("x".repeat(500)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/ai-nutritionist/conversation"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/ai-nutritionist/conversation/clear"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(&config_for(&server), Assistant::Nutritionist)?;

    match backend.send_message("hello").await {
        Err(ClientError::BadRequest(body)) => assert_eq!(body.len(), 200),
        other => panic!("expected BadRequest, got {other:?}"),
    }
    assert!(matches!(backend.fetch_conversation().await, Err(ClientError::Unauthorized)));
    match backend.clear_conversation().await {
        Err(ClientError::Server(body)) => assert_eq!(body, "database down"),
        other => panic!("expected Server, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_blank_message_is_rejected_locally() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(exchange_body()))
        .expect(0)
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(&config_for(&server), Assistant::Nutritionist)?;
    assert!(matches!(backend.send_message("   ").await, Err(ClientError::EmptyMessage)));
    Ok(())
}

#[tokio::test]
async fn test_check_connection_statuses() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ai-nutritionist/conversation"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/ai-coach/conversation"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let nutritionist = ReqwestBackend::new(&config, Assistant::Nutritionist)?;
    let coach = ReqwestBackend::new(&config, Assistant::Coach)?;
    assert_eq!(nutritionist.check_connection().await, ConnectionStatus::Connected);
    assert_eq!(coach.check_connection().await, ConnectionStatus::Error(503));

    let unreachable = ReqwestBackend::new(
        &BackendConfig {
            base_url: "http://127.0.0.1:1/api".into(),
            ..Default::default()
        },
        Assistant::Nutritionist,
    )?;
    assert_eq!(unreachable.check_connection().await, ConnectionStatus::Disconnected);
    Ok(())
}

#[tokio::test]
async fn test_slow_backend_times_out() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ai-coach/conversation"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"messages": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = BackendConfig {
        request_timeout_secs: 1,
        ..config_for(&server)
    };
    let backend = ReqwestBackend::new(&config, Assistant::Coach)?;
    assert!(matches!(backend.fetch_conversation().await, Err(ClientError::Timeout)));
    Ok(())
}
