//! Route tests: drive the router in-process with no external services
//! configured, checking status codes and response shapes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use marquee_core::MarqueeConfig;
use marquee_generate::GeminiConfig;
use marquee_server::{build_router, AppState};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tower::ServiceExt;

fn catalog_text(count: usize) -> String {
    let mut text = String::from("List of LGBTQ-related films\nA\n0–9\n");
    for i in 0..count {
        text.push_str(&format!("Film Number {i}, France ({})\n", 1990 + (i % 30)));
    }
    text.push_str("Love, Simon, United States (2018)\nCarol (2015)\nBound\n");
    text
}

/// Build state over a temp data dir. `catalog` of `None` leaves the file absent.
fn test_state(dir: &tempfile::TempDir, catalog: Option<&str>) -> Arc<AppState> {
    test_state_with(dir, catalog, GeminiConfig::default())
}

fn test_state_with(
    dir: &tempfile::TempDir,
    catalog: Option<&str>,
    gemini: GeminiConfig,
) -> Arc<AppState> {
    if let Some(text) = catalog {
        std::fs::write(dir.path().join("catalog.txt"), text).unwrap();
    }
    let vars: HashMap<&str, &str> = HashMap::new();
    let config = MarqueeConfig::from_lookup(dir.path(), |k| vars.get(k).map(|v| v.to_string()))
        .unwrap();
    Arc::new(AppState::new(config, gemini))
}

/// Read one request and return its request line.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            return String::new();
        }
        request.extend_from_slice(&buf[..n]);
        if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&request[..end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if request.len() >= end + 4 + length {
                return head.lines().next().unwrap_or_default().to_string();
            }
        }
    }
}

/// Stand-in TMDB endpoint answering every connection by request path.
async fn mock_tmdb() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let request_line = read_request(&mut socket).await;
            let body = if request_line.contains("/genre/movie/list") {
                json!({"genres": [{"id": 18, "name": "Drama"}, {"id": 10749, "name": "Romance"}]})
            } else if request_line.contains("query=carol") {
                json!({"results": [
                    {"id": 258480, "title": "Carol", "release_date": "2015-11-20", "vote_count": 4000, "genre_ids": [18, 10749]}
                ]})
            } else {
                json!({"results": [
                    {"id": 9303, "title": "Bound", "release_date": "1996-09-13", "vote_count": 900, "genre_ids": [80]}
                ]})
            };
            let body = body.to_string();
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{}", addr)
}

/// Stand-in Gemini endpoint streaming `document` as SSE events. The body is
/// written in small pieces so events and characters straddle reads.
async fn mock_gemini(document: &str) -> GeminiConfig {
    let mut body = String::new();
    for line in document.split_inclusive('\n') {
        let event = json!({"candidates": [{"content": {"parts": [{"text": line}], "role": "model"}}]});
        body.push_str(&format!("data: {}\r\n\r\n", event));
    }
    body.push_str("data: {\"usageMetadata\":{\"candidatesTokenCount\":64}}\r\n\r\n");

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        socket.set_nodelay(true).unwrap();
        read_request(&mut socket).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n")
            .await
            .unwrap();
        for piece in body.as_bytes().chunks(37) {
            socket.write_all(piece).await.unwrap();
            socket.flush().await.unwrap();
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        let _ = socket.shutdown().await;
    });

    GeminiConfig {
        api_key: Some("test-key".into()),
        base_url: format!("http://{}", addr),
        ..Default::default()
    }
}

async fn send(state: Arc<AppState>, request: Request<Body>) -> (StatusCode, Value) {
    let response = build_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_browse_returns_random_sample() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir, Some(&catalog_text(40)));
    let (status, json) = send(state, get("/api/movies")).await;

    assert_eq!(status, StatusCode::OK);
    let movies = json["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 10);
    for movie in movies {
        assert!(movie["title"].is_string());
        assert!(movie.get("year").is_some());
    }
}

#[tokio::test]
async fn test_query_filters_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir, Some(&catalog_text(5)));
    let (status, json) = send(state, get("/api/movies?query=carol")).await;

    assert_eq!(status, StatusCode::OK);
    let movies = json["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["title"], "Carol");
    assert_eq!(movies[0]["year"], "2015");
}

#[tokio::test]
async fn test_bare_title_has_null_year() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir, Some(&catalog_text(0)));
    let (_, json) = send(state, get("/api/movies?query=Bound")).await;

    let movies = json["movies"].as_array().unwrap();
    assert_eq!(movies[0]["title"], "Bound");
    assert!(movies[0]["year"].is_null());
}

#[tokio::test]
async fn test_missing_catalog_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir, None);
    let (status, json) = send(state, get("/api/movies")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Movie list file not found");
}

#[tokio::test]
async fn test_details_without_tmdb_key() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir, Some(""));
    let (status, json) = send(state, get("/api/movies/550")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "TMDB API key is not configured");
}

#[tokio::test]
async fn test_short_prediction_query_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir, Some(""));
    let (status, json) = send(state, get("/api/predictions?query=a")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["predictions"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_search_requires_query() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir, Some(""));
    let (status, _) = send(state, get("/api/search")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_synopsis_requires_title_and_overview() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir, Some(""));
    let (status, json) = send(state, post_json("/api/gemini", r#"{"title": "Carol"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Title and overview are required");
}

#[tokio::test]
async fn test_synopsis_without_key_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir, Some(""));
    let body = r#"{"title": "Carol", "overview": "Two women meet in 1950s New York."}"#;
    let (status, json) = send(state, post_json("/api/gemini", body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Gemini API key is not configured");
}

#[tokio::test]
async fn test_analysis_validates_before_generating() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir, Some(""));
    let (status, _) = send(state, post_json("/api/analysis", r#"{"overview": "x"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_gemini_status_hides_key() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir, Some(""));
    let (status, json) = send(state, get("/api/gemini/status")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["configured"], false);
    assert!(json["model"].is_string());
}

#[tokio::test]
async fn test_analysis_returns_extracted_record() {
    let document = "## Movie X\n2021\n\n**Synopsis**\n\nA story about discovery.\n\nKey Elements\n\n**Tone:** Hopeful\nGenre: Drama\n\nTropes & Tags\n\nFound Family\nComing of Age & First Love\nSelf-Discovery\n\nWhere to Watch\n\nStreamCo\n\u{26a0}\u{fe0f} Availability may vary by region.\nLeftover\n";
    let dir = tempfile::tempdir().unwrap();
    let state = test_state_with(&dir, Some(""), mock_gemini(document).await);
    let body = r#"{"title": "Movie X", "overview": "A story."}"#;
    let (status, json) = send(state, post_json("/api/analysis", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "title": "Movie X",
            "releaseDate": "2021",
            "synopsis": "A story about discovery.",
            "keyElements": ["Tone: Hopeful", "Genre: Drama"],
            "tropesAndTags": ["Found Family", "Self-Discovery"],
            "whereToWatch": ["StreamCo"],
        })
    );
}

#[tokio::test]
async fn test_synopsis_returns_cleaned_text() {
    let document = "## AI-Generated Synopsis\n**Carol** follows two women \u{2014} in *1950s* New York.";
    let dir = tempfile::tempdir().unwrap();
    let state = test_state_with(&dir, Some(""), mock_gemini(document).await);
    let body = r#"{"title": "Carol", "overview": "Two women meet in 1950s New York."}"#;
    let (status, json) = send(state, post_json("/api/gemini", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "synopsis": "Carol follows two women \u{2014} in 1950s New York." }));
}

#[tokio::test]
async fn test_discover_groups_sampled_entries_by_genre() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("catalog.txt"), "Carol (2015)\nBound (1996)\n").unwrap();
    let base_url = mock_tmdb().await;
    let vars: HashMap<&str, String> = HashMap::from([
        ("TMDB_API_KEY", "test-key".to_string()),
        ("TMDB_BASE_URL", base_url),
    ]);
    let config = MarqueeConfig::from_lookup(dir.path(), |k| vars.get(k).cloned()).unwrap();
    let state = Arc::new(AppState::new(config, GeminiConfig::default()));

    let (status, json) = send(state, get("/api/discover")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["resultCount"], 2);
    assert!(json.get("entries").is_none());

    let mut genres: Vec<&str> = json["groups"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["genre"].as_str().unwrap())
        .collect();
    genres.sort_unstable();
    assert_eq!(genres, vec!["Drama", "Romance", "Unknown"]);
}
