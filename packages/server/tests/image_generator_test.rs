//! DalleImageGenerator against a local mock of the image API.

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use smilesync_server::{
    domain::{AnimalType, ImageGenerationError, ImageGenerator, Level},
    infrastructure::image_generator::DalleImageGenerator,
};
use tokio::net::TcpListener;

#[derive(Clone)]
struct MockApi {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn generations(
    State(api): State<MockApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    api.seen.lock().unwrap().push((auth, body));
    (api.status, Json(api.reply.clone())).into_response()
}

async fn start_mock(api: MockApi) -> SocketAddr {
    let app = Router::new()
        .route("/v1/images/generations", post(generations))
        .with_state(api);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn mock(status: StatusCode, reply: Value) -> MockApi {
    MockApi {
        status,
        reply,
        seen: Arc::new(Mutex::new(Vec::new())),
    }
}

fn generator(addr: SocketAddr) -> DalleImageGenerator {
    DalleImageGenerator::new(
        format!("http://{}/v1/images/generations", addr),
        "test-key".to_string(),
    )
}

#[tokio::test]
async fn test_generate_returns_first_url() {
    // テスト項目: API の最初の URL が返り、プロンプトと認証ヘッダーが送られる
    // given (前提条件):
    let api = mock(
        StatusCode::OK,
        json!({"data": [{"url": "https://img.example/1.png"}, {"url": "https://img.example/2.png"}]}),
    );
    let seen = api.seen.clone();
    let addr = start_mock(api).await;

    // when (操作):
    let image = generator(addr)
        .generate(Level::new(3).unwrap(), AnimalType::new("cat".to_string()).unwrap())
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(image.url, "https://img.example/1.png");
    assert!(image.prompt.contains("cat"));
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(body["prompt"], image.prompt.as_str());
    assert_eq!(body["n"], 1);
    assert_eq!(body["response_format"], "url");
}

#[tokio::test]
async fn test_generate_reports_error_status() {
    // テスト項目: 成功以外のステータスはエラーになる
    // given (前提条件):
    let addr = start_mock(mock(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "boom"}),
    ))
    .await;

    // when (操作):
    let result = generator(addr)
        .generate(Level::default(), AnimalType::default())
        .await;

    // then (期待する結果):
    assert!(matches!(
        result,
        Err(ImageGenerationError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_generate_without_images_is_empty_response() {
    // テスト項目: 画像が含まれないレスポンスはエラーになる
    // given (前提条件):
    let addr = start_mock(mock(StatusCode::OK, json!({"data": []}))).await;

    // when (操作):
    let result = generator(addr)
        .generate(Level::default(), AnimalType::default())
        .await;

    // then (期待する結果):
    assert!(matches!(result, Err(ImageGenerationError::EmptyResponse)));
}
