use portico_auth::Client;
use portico_server::{AppConfig, build_app};
use reqwest::{StatusCode, header};
use serde_json::Value;
use tokio::task::JoinHandle;

fn test_config() -> AppConfig {
    AppConfig {
        clients: vec![
            Client::new("web-app", ["https://app.example.com/callback"]),
            Client::new(
                "multi",
                ["https://a.example.com/cb", "https://b.example.com/cb?tenant=b"],
            ),
        ],
        ..AppConfig::default()
    }
}

async fn start_server() -> (String, tokio::sync::oneshot::Sender<()>, JoinHandle<()>) {
    let app = build_app(&test_config()).expect("build app");

    // Bind to an ephemeral port
    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await;
    });

    (format!("http://{addr}"), tx, server)
}

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn location(resp: &reqwest::Response) -> url::Url {
    let raw = resp.headers()[header::LOCATION].to_str().unwrap();
    url::Url::parse(raw).unwrap()
}

fn query_value(url: &url::Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[tokio::test]
async fn authorize_endpoint_works() {
    let (base, shutdown_tx, handle) = start_server().await;
    let client = http_client();
    let endpoint = format!("{base}/oauth/authorize");

    // Success: single registered URI is used when redirect_uri is omitted
    let resp = client
        .get(&endpoint)
        .query(&[
            ("client_id", "web-app"),
            ("response_type", "code"),
            ("state", "abcdefgh"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    let loc = location(&resp);
    assert_eq!(loc.host_str(), Some("app.example.com"));
    assert_eq!(loc.path(), "/callback");
    assert_eq!(query_value(&loc, "state").as_deref(), Some("abcdefgh"));
    assert_eq!(query_value(&loc, "code").map(|c| c.len()), Some(43));

    // Success via POST form, existing query on the registered URI is kept
    let resp = client
        .post(&endpoint)
        .form(&[
            ("client_id", "multi"),
            ("response_type", "code"),
            ("state", "abcdefghijk"),
            ("redirect_uri", "https://b.example.com/cb?tenant=b"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    let loc = location(&resp);
    assert_eq!(query_value(&loc, "tenant").as_deref(), Some("b"));
    assert!(query_value(&loc, "code").is_some());

    // Unknown client: JSON error, no redirect
    let resp = client
        .get(&endpoint)
        .query(&[
            ("client_id", "ghost"),
            ("response_type", "code"),
            ("state", "abcdefgh"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get(header::LOCATION).is_none());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "invalid_client");

    // Unregistered redirect URI: JSON error, never redirected
    let resp = client
        .get(&endpoint)
        .query(&[
            ("client_id", "web-app"),
            ("response_type", "code"),
            ("state", "abcdefgh"),
            ("redirect_uri", "https://evil.example.com/callback"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "invalid_request");

    // Short state: error redirected to the verified URI
    let resp = client
        .get(&endpoint)
        .query(&[
            ("client_id", "web-app"),
            ("response_type", "code"),
            ("state", "short"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    let loc = location(&resp);
    assert_eq!(query_value(&loc, "error").as_deref(), Some("invalid_state"));
    assert!(query_value(&loc, "error_description").is_some());

    // Unsupported response type: no handler found
    let resp = client
        .get(&endpoint)
        .query(&[
            ("client_id", "web-app"),
            ("response_type", "token"),
            ("state", "abcdefgh"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FOUND);
    let loc = location(&resp);
    assert_eq!(
        query_value(&loc, "error").as_deref(),
        Some("unsupported_response_type")
    );

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}
