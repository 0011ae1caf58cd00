//! Integration tests for the resource services using wiremock.

use chrono::{TimeZone, Utc};
use serde_json::json;
use spyglass::services::{CreateKeyRequest, MAX_LOG_BATCH_SIZE};
use spyglass::types::{
    EmbeddingsRequest, LogFilter, Message, Patch, RequestLog, SttRequest, TtsRequest,
};
use spyglass::{Client, Error, Spyglass};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_sdk(server: &MockServer) -> Spyglass {
    Spyglass::from_client(
        Client::builder()
            .api_key("sk-test")
            .base_url(server.uri())
            .build(),
    )
}

fn sample_log() -> RequestLog {
    RequestLog {
        model: "gpt-4".to_string(),
        prompt_messages: vec![Message {
            role: "user".to_string(),
            content: json!("hello"),
            name: None,
        }],
        ..RequestLog::default()
    }
}

// ============================================================================
// Logs
// ============================================================================

#[tokio::test]
async fn logs_create_posts_one_log() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/request-logs/create/"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_json(&sample_log()))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    test_sdk(&mock_server)
        .logs()
        .create(&sample_log())
        .await
        .expect("created");
}

#[tokio::test]
async fn logs_batch_at_limit_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/request-logs/batch/create"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let logs = vec![sample_log(); MAX_LOG_BATCH_SIZE];
    test_sdk(&mock_server)
        .logs()
        .batch_create(&logs)
        .await
        .expect("batch at the limit is accepted");

    let requests = mock_server
        .received_requests()
        .await
        .expect("recorded requests");
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn logs_batch_over_limit_fails_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/request-logs/batch/create"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let logs = vec![sample_log(); MAX_LOG_BATCH_SIZE + 1];
    let err = test_sdk(&mock_server)
        .logs()
        .batch_create(&logs)
        .await
        .expect_err("over the limit");

    assert!(
        matches!(err, Error::InvalidRequest(_)),
        "expected local validation error, got {err:?}"
    );

    let requests = mock_server
        .received_requests()
        .await
        .expect("recorded requests");
    assert!(requests.is_empty(), "no request may be sent");
}

#[tokio::test]
async fn logs_list_sends_filter_as_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/request-logs"))
        .and(query_param("model", "gpt-4"))
        .and(query_param("failed", "true"))
        .and(query_param("limit", "25"))
        .and(query_param("start_time", "2024-01-01T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logs": [],
            "total_count": 0
        })))
        .mount(&mock_server)
        .await;

    let filter = LogFilter {
        model: Some("gpt-4".to_string()),
        failed: Some(true),
        limit: Some(25),
        start_time: Some(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .expect("valid date"),
        ),
        ..LogFilter::default()
    };

    let page = test_sdk(&mock_server)
        .logs()
        .list(Some(&filter))
        .await
        .expect("page");
    assert_eq!(page.total_count, 0);
    assert!(page.logs.is_empty());
}

#[tokio::test]
async fn logs_get_fetches_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/request-logs/log_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&sample_log()))
        .mount(&mock_server)
        .await;

    let log = test_sdk(&mock_server)
        .logs()
        .get("log_123")
        .await
        .expect("log");
    assert_eq!(log.model, "gpt-4");
}

#[tokio::test]
async fn logs_update_patches_set_fields_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/request-logs/log_123"))
        .and(body_json(json!({"category": "eval"})))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let updates = Patch::new().set("category", "eval");
    test_sdk(&mock_server)
        .logs()
        .update("log_123", &updates)
        .await
        .expect("updated");
}

#[tokio::test]
async fn logs_threads_scoped_by_customer_uses_post() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/threads"))
        .and(body_json(json!({"customer_identifier": "cust_1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "thr_1",
            "customer_identifier": "cust_1",
            "messages": [],
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        }])))
        .mount(&mock_server)
        .await;

    let threads = test_sdk(&mock_server)
        .logs()
        .list_threads(Some("cust_1"))
        .await
        .expect("threads");
    assert_eq!(threads.len(), 1);
    assert_eq!(threads.first().expect("thread").id, "thr_1");
}

#[tokio::test]
async fn logs_threads_unscoped_uses_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/threads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let threads = test_sdk(&mock_server)
        .logs()
        .list_threads(None)
        .await
        .expect("threads");
    assert!(threads.is_empty());
}

// ============================================================================
// Prompts
// ============================================================================

fn prompt_body(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn prompts_create_sends_name_and_description() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/prompts/"))
        .and(body_json(json!({
            "name": "greeting",
            "description": "Say hello"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(prompt_body("pr_1", "greeting")))
        .mount(&mock_server)
        .await;

    let prompt = test_sdk(&mock_server)
        .prompts()
        .create("greeting", Some("Say hello"))
        .await
        .expect("prompt");
    assert_eq!(prompt.id, "pr_1");
    assert_eq!(prompt.name, "greeting");
}

#[tokio::test]
async fn prompts_create_omits_unset_description() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/prompts/"))
        .and(body_json(json!({"name": "greeting"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(prompt_body("pr_1", "greeting")))
        .mount(&mock_server)
        .await;

    test_sdk(&mock_server)
        .prompts()
        .create("greeting", None)
        .await
        .expect("prompt");
}

#[tokio::test]
async fn prompts_list_get_update_delete() {
    let mock_server = MockServer::start().await;
    let sdk = test_sdk(&mock_server);

    Mock::given(method("GET"))
        .and(path("/api/prompts/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([prompt_body("pr_1", "greeting")])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/prompts/pr_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(prompt_body("pr_1", "greeting")))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/prompts/pr_1"))
        .and(body_json(json!({"name": "welcome"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(prompt_body("pr_1", "welcome")))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/prompts/pr_1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let prompts = sdk.prompts().list().await.expect("list");
    assert_eq!(prompts.len(), 1);

    let prompt = sdk.prompts().get("pr_1").await.expect("get");
    assert_eq!(prompt.name, "greeting");

    let updated = sdk
        .prompts()
        .update("pr_1", &Patch::new().set("name", "welcome"))
        .await
        .expect("update");
    assert_eq!(updated.name, "welcome");

    sdk.prompts().delete("pr_1").await.expect("delete");
}

#[tokio::test]
async fn prompt_versions_round_trip() {
    let mock_server = MockServer::start().await;
    let sdk = test_sdk(&mock_server);

    let version_body = json!({
        "id": "ver_1",
        "prompt_id": "pr_1",
        "version": 1,
        "name": "v1",
        "template": "Hello {name}!",
        "is_active": true,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    });

    Mock::given(method("POST"))
        .and(path("/api/prompts/pr_1/versions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(&version_body))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/prompts/pr_1/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([&version_body])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/prompts/pr_1/versions/ver_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&version_body))
        .mount(&mock_server)
        .await;

    let mut updated_body = version_body.clone();
    updated_body["name"] = json!("v1-final");

    Mock::given(method("PATCH"))
        .and(path("/api/prompts/pr_1/versions/ver_1"))
        .and(body_json(json!({"name": "v1-final"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&updated_body))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/prompts/pr_1/versions/ver_1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let draft = serde_json::from_value(version_body.clone()).expect("draft version");
    let created = sdk
        .prompts()
        .create_version("pr_1", &draft)
        .await
        .expect("create");
    assert_eq!(created.template, "Hello {name}!");

    let versions = sdk.prompts().list_versions("pr_1").await.expect("list");
    assert_eq!(versions.len(), 1);

    let version = sdk
        .prompts()
        .get_version("pr_1", "ver_1")
        .await
        .expect("get");
    assert!(version.is_active);

    let renamed = sdk
        .prompts()
        .update_version("pr_1", "ver_1", &Patch::new().set("name", "v1-final"))
        .await
        .expect("update");
    assert_eq!(renamed.name, "v1-final");

    sdk.prompts()
        .delete_version("pr_1", "ver_1")
        .await
        .expect("delete");
}

// ============================================================================
// Models
// ============================================================================

#[tokio::test]
async fn models_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "gpt-4",
            "name": "GPT-4",
            "provider": "openai",
            "input_cost": 0.00003,
            "output_cost": 0.00006,
            "max_tokens": 4096,
            "context_window": 128_000,
            "supported_modes": ["chat"],
            "is_available": true
        }])))
        .mount(&mock_server)
        .await;

    let models = test_sdk(&mock_server).models().list().await.expect("models");
    assert_eq!(models.len(), 1);
    let model = models.first().expect("model");
    assert_eq!(model.id, "gpt-4");
    assert!(model.is_available);
}

// ============================================================================
// Keys
// ============================================================================

#[tokio::test]
async fn keys_create_list_delete() {
    let mock_server = MockServer::start().await;
    let sdk = test_sdk(&mock_server);

    let key_body = json!({
        "id": "key_1",
        "key": "sk-tmp-abc",
        "expires_at": "2024-06-01T00:00:00Z",
        "created_at": "2024-01-01T00:00:00Z",
        "is_active": true,
        "usage_count": 0
    });

    Mock::given(method("POST"))
        .and(path("/api/temporary-keys"))
        .and(body_json(json!({"expires_at": "2024-06-01T00:00:00Z"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(&key_body))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/temporary-keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([&key_body])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/temporary-keys/key_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&key_body))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/temporary-keys/key_1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let expires_at = Utc
        .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
        .single()
        .expect("valid date");
    let created = sdk
        .keys()
        .create(&CreateKeyRequest::expiring_at(expires_at))
        .await
        .expect("create");
    assert_eq!(created.id, "key_1");
    assert!(created.is_active);

    let keys = sdk.keys().list().await.expect("list");
    assert_eq!(keys.len(), 1);

    let fetched = sdk.keys().get("key_1").await.expect("get");
    assert_eq!(fetched.key, "sk-tmp-abc");

    sdk.keys().delete("key_1").await.expect("delete");
}

#[tokio::test]
async fn keys_update_patches_usage_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/temporary-keys/key_1"))
        .and(body_json(json!({"usage_limit": 500})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "key_1",
            "key": "sk-tmp-abc",
            "expires_at": "2024-06-01T00:00:00Z",
            "created_at": "2024-01-01T00:00:00Z",
            "is_active": true,
            "usage_limit": 500,
            "usage_count": 12
        })))
        .mount(&mock_server)
        .await;

    let key = test_sdk(&mock_server)
        .keys()
        .update("key_1", &Patch::new().set("usage_limit", 500))
        .await
        .expect("update");
    assert_eq!(key.usage_limit, Some(500));
}

// ============================================================================
// Integrations
// ============================================================================

#[tokio::test]
async fn integrations_embeddings_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .and(body_json(json!({
            "model": "text-embed-1",
            "input": "hello world"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{"object": "embedding", "embedding": [0.1, 0.2, 0.3], "index": 0}],
            "model": "text-embed-1",
            "usage": {"prompt_tokens": 2, "completion_tokens": 0, "total_tokens": 2}
        })))
        .mount(&mock_server)
        .await;

    let request = EmbeddingsRequest {
        model: "text-embed-1".to_string(),
        input: json!("hello world"),
        ..EmbeddingsRequest::default()
    };

    let reply = test_sdk(&mock_server)
        .integrations()
        .create_embeddings(&request)
        .await
        .expect("embeddings");
    assert_eq!(reply.data.len(), 1);
    assert_eq!(reply.data.first().expect("entry").embedding.len(), 3);
    assert_eq!(reply.usage.total_tokens, 2);
}

#[tokio::test]
async fn integrations_tts_returns_raw_audio() {
    let mock_server = MockServer::start().await;

    let audio = vec![0x49u8, 0x44, 0x33, 0x04, 0x00];
    Mock::given(method("POST"))
        .and(path("/api/audio/speech"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(audio.clone())
                .insert_header("Content-Type", "audio/mpeg"),
        )
        .mount(&mock_server)
        .await;

    let request = TtsRequest {
        model: "tts-1".to_string(),
        input: "hello".to_string(),
        voice: "aria".to_string(),
        ..TtsRequest::default()
    };

    let bytes = test_sdk(&mock_server)
        .integrations()
        .text_to_speech(&request)
        .await
        .expect("audio");
    assert_eq!(bytes.as_ref(), &audio[..]);
}

#[tokio::test]
async fn integrations_stt_sends_multipart_clip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "hello world",
            "language": "en",
            "duration": 2.5
        })))
        .mount(&mock_server)
        .await;

    let clip = vec![0x52u8, 0x49, 0x46, 0x46, 0x10, 0x20];
    let request = SttRequest {
        model: "whisper-1".to_string(),
        language: Some("en".to_string()),
        temperature: Some(0.5),
        ..SttRequest::default()
    };

    let reply = test_sdk(&mock_server)
        .integrations()
        .speech_to_text(clip.clone(), &request)
        .await
        .expect("transcript");
    assert_eq!(reply.text, "hello world");
    assert_eq!(reply.language, "en");

    let requests = mock_server
        .received_requests()
        .await
        .expect("recorded requests");
    let request = requests.first().expect("one request");
    let body = String::from_utf8_lossy(&request.body);

    assert!(body.contains("name=\"model\""));
    assert!(body.contains("whisper-1"));
    assert!(body.contains("name=\"file\"; filename=\"audio.wav\""));
    assert!(body.contains("name=\"language\""));
    assert!(body.contains("name=\"temperature\""));
    assert!(body.contains("0.500000"));
    assert!(
        request
            .body
            .windows(clip.len())
            .any(|window| window == clip),
        "multipart body must contain the original clip bytes"
    );
}
