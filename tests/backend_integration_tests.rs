use std::sync::Arc;

use serde_json::json;
use tale::backend::{
    BackendError, ContinueRequest, ConversationTurn, Endpoint, HttpBackend, Role, StartRequest,
    StoryBackend,
};
use tale::core::{Action, App, Effect, UiState, update};
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn history(texts: &[(&str, &str)]) -> serde_json::Value {
    json!(
        texts
            .iter()
            .map(|(role, text)| json!({"role": role, "parts": [{"text": text}]}))
            .collect::<Vec<_>>()
    )
}

fn segment_body(story: &str, choices: &[&str], turns: &[(&str, &str)]) -> serde_json::Value {
    json!({
        "story_text": story,
        "image_prompt": format!("An illustration of: {story}"),
        "choices": choices,
        "updated_story_history": history(turns),
    })
}

/// Runs an action through the reducer, and if it asks for a request, sends it
/// and feeds the outcome back in, the way the event loop does.
async fn drive(app: &mut App, action: Action) -> Effect {
    let effect = update(app, action);
    if let Effect::SpawnRequest(request) = &effect {
        assert!(app.is_loading(), "Spawning a request enters Loading");
        let outcome = app.backend.send(request).await;
        update(app, Action::from_outcome(request.endpoint(), outcome));
    }
    effect
}

fn app_for(server: &MockServer) -> App {
    App::new(Arc::new(HttpBackend::new(server.uri())))
}

// ============================================================================
// HttpBackend
// ============================================================================

#[tokio::test]
async fn test_start_posts_theme_and_parses_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/story/start"))
        .and(body_json(json!({"theme": "a brave puppy"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(segment_body(
            "The puppy woke up.",
            &["Go outside.", "Eat breakfast."],
            &[("user", "start"), ("model", "The puppy woke up.")],
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let segment = assert_ok!(
        backend
            .start_story(&StartRequest {
                theme: "a brave puppy".to_string()
            })
            .await
    );

    assert_eq!(segment.story_text, "The puppy woke up.");
    assert_eq!(segment.choices, vec!["Go outside.", "Eat breakfast."]);
    assert_eq!(segment.updated_story_history.len(), 2);
    assert_eq!(segment.updated_story_history[1].role, Role::Model);
}

#[tokio::test]
async fn test_continue_posts_history_and_choice() {
    let mock_server = MockServer::start().await;
    let turns = [("user", "start"), ("model", "The puppy woke up.")];

    Mock::given(method("POST"))
        .and(path("/api/story/continue"))
        .and(body_json(json!({
            "story_history": history(&turns),
            "choice_text": "Go outside.",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(segment_body(
            "It was sunny.",
            &["Chase a butterfly."],
            &[],
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let request = ContinueRequest {
        story_history: vec![
            ConversationTurn::new(Role::User, "start"),
            ConversationTurn::new(Role::Model, "The puppy woke up."),
        ],
        choice_text: "Go outside.".to_string(),
    };
    let segment = assert_ok!(backend.continue_story(&request).await);
    assert_eq!(segment.story_text, "It was sunny.");
}

#[tokio::test]
async fn test_error_detail_is_extracted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/story/start"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"detail": "rate limited"})))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let err = assert_err!(
        backend
            .start_story(&StartRequest {
                theme: "x".to_string()
            })
            .await
    );
    assert_eq!(
        err,
        BackendError::Api {
            status: 429,
            detail: Some("rate limited".to_string())
        }
    );
}

#[tokio::test]
async fn test_success_with_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/story/start"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"story_text\": "))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let err = assert_err!(
        backend
            .start_story(&StartRequest {
                theme: "x".to_string()
            })
            .await
    );
    assert!(matches!(err, BackendError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Nothing listens on port 1
    let backend = HttpBackend::new("http://127.0.0.1:1");
    let err = assert_err!(
        backend
            .start_story(&StartRequest {
                theme: "x".to_string()
            })
            .await
    );
    assert!(matches!(err, BackendError::Network(_)));
    assert!(!err.user_message(Endpoint::Start).is_empty());
}

// ============================================================================
// Controller flow against the mock backend
// ============================================================================

#[tokio::test]
async fn test_start_then_continue_replaces_history_each_time() {
    let mock_server = MockServer::start().await;
    let first_turns = [("user", "Start a story about dragons"), ("model", "A dragon yawned.")];
    let second_turns = [
        ("user", "Start a story about dragons"),
        ("model", "A dragon yawned."),
        ("user", "The child chose: \"Say hello.\""),
        ("model", "The dragon smiled."),
    ];

    Mock::given(method("POST"))
        .and(path("/api/story/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(segment_body(
            "A dragon yawned.\nIt was very sleepy.",
            &["Say hello.", "Tiptoe away."],
            &first_turns,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    // The continue call must carry the first response's history verbatim
    Mock::given(method("POST"))
        .and(path("/api/story/continue"))
        .and(body_json(json!({
            "story_history": history(&first_turns),
            "choice_text": "Say hello.",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(segment_body(
            "The dragon smiled.",
            &["Ask for a ride."],
            &second_turns,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);

    drive(&mut app, Action::StartStory("dragons".to_string())).await;
    let snapshot = app.snapshot().expect("story after start");
    assert_eq!(snapshot.story_text, "A dragon yawned.\nIt was very sleepy.");
    assert_eq!(snapshot.paragraphs(), vec!["A dragon yawned.", "It was very sleepy."]);
    assert_eq!(snapshot.image_prompt, "An illustration of: A dragon yawned.\nIt was very sleepy.");
    assert_eq!(snapshot.choices, vec!["Say hello.", "Tiptoe away."]);
    assert_eq!(serde_json::to_value(&app.history).unwrap(), history(&first_turns));

    drive(&mut app, Action::ContinueStory("Say hello.".to_string())).await;
    let snapshot = app.snapshot().expect("story after continue");
    assert_eq!(snapshot.story_text, "The dragon smiled.");
    assert_eq!(snapshot.choices, vec!["Ask for a ride."]);
    assert_eq!(serde_json::to_value(&app.history).unwrap(), history(&second_turns));
    assert_eq!(app.status_message, "Chapter 2");
}

#[tokio::test]
async fn test_rate_limited_detail_reaches_error_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/story/start"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"detail": "rate limited"})))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    drive(&mut app, Action::StartStory("dragons".to_string())).await;
    assert_eq!(app.ui, UiState::Error("rate limited".to_string()));
}

#[tokio::test]
async fn test_unparseable_error_body_gives_fallback_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/story/start"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    drive(&mut app, Action::StartStory("dragons".to_string())).await;
    assert_eq!(
        app.error_message(),
        Some("Failed to start story. Server returned an error.")
    );
}

#[tokio::test]
async fn test_continue_failure_uses_continue_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/story/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(segment_body(
            "Hi.",
            &["Wave."],
            &[("user", "s"), ("model", "Hi.")],
        )))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/story/continue"))
        .respond_with(ResponseTemplate::new(503).set_body_string(""))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    drive(&mut app, Action::StartStory("dragons".to_string())).await;
    drive(&mut app, Action::ContinueStory("Wave.".to_string())).await;
    assert_eq!(
        app.error_message(),
        Some("Failed to continue story. Server returned an error.")
    );
}

#[tokio::test]
async fn test_blank_theme_never_reaches_backend() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server);
    let effect = drive(&mut app, Action::StartStory("   ".to_string())).await;
    assert_eq!(effect, Effect::None);
    assert_eq!(app.ui, UiState::Initial);
}

#[tokio::test]
async fn test_restart_after_error_matches_startup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/story/start"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let fresh = app_for(&mock_server);
    let mut app = app_for(&mock_server);
    drive(&mut app, Action::StartStory("dragons".to_string())).await;
    assert!(matches!(app.ui, UiState::Error(ref msg) if !msg.is_empty()));

    drive(&mut app, Action::Restart).await;
    assert_eq!(app.ui, fresh.ui);
    assert_eq!(app.history, fresh.history);
    assert_eq!(app.status_message, fresh.status_message);
}
