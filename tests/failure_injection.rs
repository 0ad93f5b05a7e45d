//! Failure injection tests: the remote service misbehaves.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

mod common;

use common::CURS_ON_DATE;

const ON_DATE: &str = r#"{"OnDate":"2023-06-22"}"#;

async fn error_of(res: reqwest::Response) -> String {
    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    body["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_remote_500_is_reported_and_not_cached() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let backend = common::start_soap_backend(move |_| {
        let count = counter.fetch_add(1, Ordering::SeqCst);
        async move {
            if count == 0 {
                (500, "Server was unable to process request".to_string())
            } else {
                (200, CURS_ON_DATE.to_string())
            }
        }
    })
    .await;
    let (gateway, _shutdown) = common::start_gateway(common::config_for(backend)).await;
    let client = common::client();
    let url = format!("http://{gateway}/GetCursOnDateXML");

    let error = error_of(client.post(&url).body(ON_DATE).send().await.unwrap()).await;
    assert_eq!(
        error,
        "Internal Server Error (GetCursOnDateXML: remote service answered 500: \
         Server was unable to process request)"
    );

    // No retry happened, and the failure left nothing in the cache.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let res = client.post(&url).body(ON_DATE).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["x-cache"], "miss");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_missing_result_node() {
    let backend = common::start_fixed_backend(
        "<soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">\
         <soap:Body><GetCursOnDateXMLResponse/></soap:Body></soap:Envelope>",
    )
    .await;
    let (gateway, _shutdown) = common::start_gateway(common::config_for(backend)).await;

    let res = common::client()
        .post(format!("http://{gateway}/GetCursOnDateXML"))
        .body(ON_DATE)
        .send()
        .await
        .unwrap();
    assert_eq!(
        error_of(res).await,
        "Internal Server Error (GetCursOnDateXML: response node <ValuteData> not found)"
    );
}

#[tokio::test]
async fn test_slow_remote_hits_request_deadline() {
    let backend = common::start_soap_backend(|_| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, CURS_ON_DATE.to_string())
    })
    .await;
    let mut config = common::config_for(backend);
    config.timeouts.request_secs = 1;
    let (gateway, _shutdown) = common::start_gateway(config).await;

    let started = std::time::Instant::now();
    let res = common::client()
        .post(format!("http://{gateway}/GetCursOnDateXML"))
        .body(ON_DATE)
        .send()
        .await
        .unwrap();
    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(
        error_of(res).await,
        "Internal Server Error (GetCursOnDateXML: request expired)"
    );
}

#[tokio::test]
async fn test_unreachable_remote() {
    // Bind then drop to get a port nothing listens on.
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let (gateway, _shutdown) = common::start_gateway(common::config_for(addr)).await;

    let res = common::client()
        .post(format!("http://{gateway}/KeyRateXML"))
        .body(r#"{"FromDate":"2023-06-01","ToDate":"2023-06-22"}"#)
        .send()
        .await
        .unwrap();
    let error = error_of(res).await;
    assert!(error.starts_with("Internal Server Error (KeyRateXML: request to http://"));
}

#[tokio::test]
async fn test_malformed_body() {
    let backend = common::start_fixed_backend(CURS_ON_DATE).await;
    let (gateway, _shutdown) = common::start_gateway(common::config_for(backend)).await;

    let res = common::client()
        .post(format!("http://{gateway}/GetCursOnDateXML"))
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert!(error_of(res)
        .await
        .starts_with("Internal Server Error (bad raw data:"));
}
