use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use webclass::{
    ClassificationClient, Endpoint, Exception, HttpTransport, PrefixRule, RequestController,
    RequestState, Transport,
};

const WIKI: &str = "https://en.wikipedia.org/wiki/";

/// 进程内的分类服务替身，记录收到的请求路径并按路径返回固定响应。
struct StubServer {
    base_url: String,
    paths: Arc<Mutex<Vec<String>>>,
}

async fn start_stub() -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let paths = Arc::new(Mutex::new(Vec::new()));

    let recorded = Arc::clone(&paths);
    tokio::spawn(async move {
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let recorded = Arc::clone(&recorded);
            tokio::spawn(async move {
                handle(stream, recorded).await;
            });
        }
    });

    StubServer {
        base_url: format!("http://127.0.0.1:{}/ajax/calcpy/", port),
        paths,
    }
}

async fn handle(mut stream: TcpStream, recorded: Arc<Mutex<Vec<String>>>) {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buffer.extend_from_slice(&chunk[..n]);
        if buffer.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    let request = String::from_utf8_lossy(&buffer).to_string();
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    recorded.lock().unwrap().push(path.clone());

    let (status, content_type, body) = if path.contains("/hang/") {
        // 不回应，等待客户端超时
        tokio::time::sleep(Duration::from_secs(30)).await;
        return;
    } else if path.contains("/broken/") {
        ("500 Internal Server Error", "text/plain", "boom".to_string())
    } else if path.contains("/html/") {
        ("200 OK", "text/html", "<h1>not json</h1>".to_string())
    } else if path.contains("/classify?word=") {
        (
            "200 OK",
            "application/json",
            r#"{"classification": "Fungi\nKingdom"}"#.to_string(),
        )
    } else if path.contains("/greet?word=") {
        ("200 OK", "application/json", r#"{"pozdrowienie": "Hello!"}"#.to_string())
    } else {
        ("404 Not Found", "text/plain", "not found".to_string())
    };

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.flush().await;
}

// 绕过环境变量中的代理设置，直连本地替身
fn local_transport(timeout: Duration) -> HttpTransport {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(timeout)
        .build()
        .unwrap();
    HttpTransport::with_client(client)
}

fn controller_for(base_url: &str, endpoint: Endpoint, timeout: Duration) -> RequestController {
    let transport = local_transport(timeout);
    let client = ClassificationClient::new(base_url, Arc::new(transport));
    RequestController::new(client, PrefixRule::case_sensitive(WIKI), endpoint)
}

#[tokio::test]
async fn test_classify_end_to_end() {
    let stub = start_stub().await;
    let mut controller = controller_for(&stub.base_url, Endpoint::Classify, Duration::from_secs(5));

    controller.set_address("https://en.wikipedia.org/wiki/Fungus");
    controller.submit_and_wait().await;

    assert_eq!(controller.display_text(), "Fungi  kategoria:Kingdom");
    assert_eq!(controller.history().len(), 1);
    assert_eq!(
        stub.paths.lock().unwrap().as_slice(),
        ["/ajax/calcpy/classify?word=https://en.wikipedia.org/wiki/Fungus"]
    );
}

#[tokio::test]
async fn test_greet_end_to_end() {
    let stub = start_stub().await;
    let mut controller = controller_for(&stub.base_url, Endpoint::Greet, Duration::from_secs(5));

    controller.set_address("https://en.wikipedia.org/wiki/Hello");
    controller.submit_and_wait().await;

    assert_eq!(controller.display_text(), "Hello!");
}

#[tokio::test]
async fn test_rejected_address_makes_no_request() {
    let stub = start_stub().await;
    let mut controller = controller_for(&stub.base_url, Endpoint::Classify, Duration::from_secs(5));

    controller.set_address("not-a-wiki-link");
    controller.submit_and_wait().await;

    assert_eq!(
        controller.state(),
        &RequestState::Failed("Wrong address!".to_string())
    );
    assert!(stub.paths.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_server_error_is_transport_failure() {
    let stub = start_stub().await;
    let base = format!("{}broken/", stub.base_url);
    let mut controller = controller_for(&base, Endpoint::Classify, Duration::from_secs(5));

    controller.set_address("https://en.wikipedia.org/wiki/Fungus");
    controller.submit_and_wait().await;

    assert!(matches!(controller.state(), RequestState::Failed(_)));
    assert!(controller.display_text().contains("500"));
}

#[tokio::test]
async fn test_non_json_body_is_transport_failure() {
    let stub = start_stub().await;
    let transport = local_transport(Duration::from_secs(5));

    let url = format!("{}html/classify?word=x", stub.base_url);
    let result = transport.get_json(&url).await;

    assert!(matches!(result, Err(Exception::TransportFailure(_))));
}

#[tokio::test]
async fn test_connection_refused_is_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let base = format!("http://127.0.0.1:{}/ajax/calcpy/", port);
    let mut controller = controller_for(&base, Endpoint::Classify, Duration::from_secs(5));

    controller.set_address("https://en.wikipedia.org/wiki/Fungus");
    controller.submit_and_wait().await;

    assert!(matches!(controller.state(), RequestState::Failed(_)));
    assert!(controller.display_text().starts_with("Request failed"));
}

#[tokio::test]
async fn test_timeout_does_not_leave_request_pending() {
    let stub = start_stub().await;
    let base = format!("{}hang/", stub.base_url);
    let mut controller = controller_for(&base, Endpoint::Classify, Duration::from_millis(200));

    controller.set_address("https://en.wikipedia.org/wiki/Fungus");
    controller.submit_and_wait().await;

    assert!(matches!(controller.state(), RequestState::Failed(_)));
    assert_eq!(controller.in_flight(), 0);
}
