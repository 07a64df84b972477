//! Exercises `ReqwestTransport` against a local TCP server.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use mpesa_application::{
    Auth, HttpTransport, MpesaConfig, MpesaError, StkPush, TransportError, TransportRequest,
};
use mpesa_domain::AccessToken;
use mpesa_infrastructure::ReqwestTransport;
use pretty_assertions::assert_eq;
use reqwest::Url;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// base64("test_client_key:test_client_secret")
const EXPECTED_BASIC: &str = "Basic dGVzdF9jbGllbnRfa2V5OnRlc3RfY2xpZW50X3NlY3JldA==";

const TOKEN_BODY: &str =
    r#"{"access_token":"c9SQxWWhmdVRlyh0zh8gZDTkubVF","token_type":"Bearer","expires_in":"3599"}"#;

/// Serves a single canned response and hands back the raw request text.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        let _ = tx.send(request);
    });

    (base_url, rx)
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn config(base_url: &str) -> MpesaConfig {
    MpesaConfig::default()
        .with_base_url(base_url)
        .with_credentials("test_client_key", "test_client_secret")
        .with_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn test_token_request_over_http() {
    let (base_url, request) = serve_once("200 OK", TOKEN_BODY).await;
    let transport = Arc::new(ReqwestTransport::new().unwrap());
    let auth = Auth::new(transport, &config(&base_url)).unwrap();

    let token = auth.get_token().await.unwrap();
    assert_eq!(token.token, "c9SQxWWhmdVRlyh0zh8gZDTkubVF");
    assert_eq!(token.expires_in, 3599);

    let raw = request.await.unwrap();
    let lowered = raw.to_ascii_lowercase();
    assert!(raw.starts_with("GET /v1/token/generate?grant_type=client_credentials HTTP/1.1"));
    assert!(raw.lines().any(|line| {
        line.split_once(':').is_some_and(|(name, value)| {
            name.eq_ignore_ascii_case("authorization") && value.trim() == EXPECTED_BASIC
        })
    }));
    assert!(lowered.contains("user-agent: mpesa-sdk/"));
}

#[tokio::test]
async fn test_unauthorized_response_is_classified() {
    let (base_url, _request) = serve_once(
        "400 Bad Request",
        r#"{"resultCode":"999991","resultDesc":"Invalid client id passed"}"#,
    )
    .await;
    let transport = Arc::new(ReqwestTransport::new().unwrap());
    let auth = Auth::new(transport, &config(&base_url)).unwrap();

    let err = auth.get_token().await.unwrap_err();
    assert!(matches!(err, MpesaError::InvalidClientId { status: 400, .. }));
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_stk_push_posts_json_with_bearer() {
    let (base_url, request) = serve_once(
        "200 OK",
        r#"{"MerchantRequestID":"m-1","CheckoutRequestID":"ws_CO_1","ResponseCode":"0","ResponseDescription":"Success. Request accepted for processing","CustomerMessage":"Success. Request accepted for processing"}"#,
    )
    .await;
    let transport = Arc::new(ReqwestTransport::new().unwrap());
    let token = AccessToken::new("tok-123", 3599);
    let stk = StkPush::new(transport, &config(&base_url), &token).unwrap();

    let payload = mpesa_domain::StkPushPayload {
        merchant_request_id: "SFC-Testing-9146-4216-9455-e3947ac570fc".to_string(),
        business_short_code: "554433".to_string(),
        password: mpesa_domain::stk_password("554433", "passkey", "20240918055823"),
        timestamp: "20240918055823".to_string(),
        transaction_type: mpesa_domain::TransactionType::CustomerPayBillOnline,
        amount: 20.into(),
        party_a: "251700404709".to_string(),
        party_b: 554_433,
        phone_number: "251700404709".to_string(),
        transaction_desc: "Payment test".to_string(),
        callback_url: "https://www.myservice:8080/result".to_string(),
        account_reference: "DATA".to_string(),
        reference_data: Vec::new(),
    };

    let response = stk.send_stk_push(&payload).await.unwrap();
    assert_eq!(response["ResponseCode"], "0");

    let raw = request.await.unwrap();
    let lowered = raw.to_ascii_lowercase();
    assert!(raw.starts_with("POST /mpesa/stkpush/v3/processrequest HTTP/1.1"));
    assert!(lowered.contains("authorization: bearer tok-123"));
    assert!(lowered.contains("content-type: application/json"));
    assert!(raw.contains(r#""BusinessShortCode":"554433""#));
    assert!(raw.contains(r#""CallBackURL":"https://www.myservice:8080/result""#));
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url: Url = format!("http://{}/slow", listener.local_addr().unwrap())
        .parse()
        .unwrap();
    tokio::spawn(async move {
        let (_stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let transport = ReqwestTransport::new().unwrap();
    let result = transport
        .send(TransportRequest::get(url, Duration::from_millis(200)))
        .await;

    assert_eq!(result, Err(TransportError::Timeout { timeout_ms: 200 }));
    let err = MpesaError::from(result.unwrap_err());
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let url: Url = format!("http://{addr}/").parse().unwrap();

    let transport = ReqwestTransport::new().unwrap();
    let result = transport
        .send(TransportRequest::post_json(
            url,
            serde_json::json!({"ping": true}),
            Duration::from_secs(2),
        ))
        .await;

    assert!(matches!(result, Err(TransportError::Connection(_))));
}
