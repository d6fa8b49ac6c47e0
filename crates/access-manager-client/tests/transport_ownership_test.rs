//! Transport ownership tests.
//!
//! A client closes the transport it owns exactly once, whether it is closed
//! explicitly or dropped, and never closes a transport it was handed as shared.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use access_manager_client::{
    AccessManagerClient, AccessManagerEventProcessor, AccessManagerQueryProcessor, HttpMethod, HttpTransport,
    Stringifiers, TransportError, TransportOwnership, TransportResponse,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

/// Records every request and counts `close` calls.
#[derive(Default)]
struct RecordingTransport {
    closes: Arc<AtomicUsize>,
    requests: std::sync::Mutex<Vec<(HttpMethod, String)>>,
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, method: HttpMethod, url: &Url) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push((method, url.to_string()));
        let resp = match method {
            HttpMethod::Get => TransportResponse::new(StatusCode::OK, r#"["user1"]"#),
            HttpMethod::Post | HttpMethod::Delete => TransportResponse::new(StatusCode::CREATED, ""),
        };
        Ok(resp)
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

fn base_url() -> Url {
    Url::parse("http://access-manager.local:5000/").unwrap()
}

#[tokio::test]
async fn owned_transport_is_closed_once_on_close() {
    let closes = Arc::new(AtomicUsize::new(0));
    let transport = RecordingTransport {
        closes: Arc::clone(&closes),
        ..Default::default()
    };
    let client: AccessManagerClient<String, String, String, String> =
        AccessManagerClient::with_owned_transport(&base_url(), Box::new(transport), Stringifiers::strings()).unwrap();
    assert_eq!(client.transport_ownership(), TransportOwnership::Owned);

    client.add_user(&"user1".to_string()).await.unwrap();
    assert_eq!(closes.load(Ordering::SeqCst), 0);

    client.close();
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn owned_transport_is_closed_on_drop() {
    let closes = Arc::new(AtomicUsize::new(0));
    {
        let transport = RecordingTransport {
            closes: Arc::clone(&closes),
            ..Default::default()
        };
        let _client: AccessManagerClient<String, String, String, String> =
            AccessManagerClient::with_owned_transport(&base_url(), Box::new(transport), Stringifiers::strings())
                .unwrap();
    }
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn shared_transport_outlives_clients() {
    let transport = Arc::new(RecordingTransport::default());

    let first: AccessManagerClient<String, String, String, String> =
        AccessManagerClient::with_shared_transport(&base_url(), transport.clone(), Stringifiers::strings()).unwrap();
    let second: AccessManagerClient<String, String, String, String> =
        AccessManagerClient::with_shared_transport(&base_url(), transport.clone(), Stringifiers::strings()).unwrap();
    assert_eq!(first.transport_ownership(), TransportOwnership::Shared);

    assert_eq!(first.get_users().await.unwrap(), ["user1"]);
    first.close();
    assert_eq!(second.get_users().await.unwrap(), ["user1"]);
    drop(second);

    assert_eq!(transport.closes.load(Ordering::SeqCst), 0);
    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0],
        (HttpMethod::Get, "http://access-manager.local:5000/api/v1/users".to_string())
    );
}

#[tokio::test]
async fn clients_can_be_shared_across_tasks() {
    let transport = Arc::new(RecordingTransport::default());
    let client: Arc<AccessManagerClient<String, String, String, String>> = Arc::new(
        AccessManagerClient::with_shared_transport(&base_url(), transport.clone(), Stringifiers::strings()).unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.add_group(&format!("group{i}")).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests.len(), 8);
    assert!(requests.iter().all(|(method, _)| *method == HttpMethod::Post));
}
