//! End-to-end tests over a real plain-HTTP listener.

use std::net::SocketAddr;

use reqwest::{redirect::Policy, StatusCode};
use secure_gate::{HttpServer, Shutdown};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

mod common;

struct Running {
    addr: SocketAddr,
    shutdown: Shutdown,
    handle: JoinHandle<Result<(), secure_gate::http::ServerError>>,
}

async fn start_gate() -> Running {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(common::demo_config());
    let rx = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, rx).await });

    Running {
        addr,
        shutdown,
        handle,
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_redirect_and_trusted_forwarded_header() {
    let gate = start_gate().await;
    let client = client();

    let res = client
        .get(format!("http://{}/", gate.addr))
        .send()
        .await
        .expect("gate unreachable");
    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()["location"], "https://127.0.0.1:3043/");

    let res = client
        .get(format!("http://{}/rfc", gate.addr))
        .header("forwarded", "for=127.0.0.1; proto=https; by=127.0.0.1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("http://{}/message", gate.addr))
        .body("test=test+data")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(res.text().await.unwrap(), common::CUSTOM_MESSAGE);

    gate.shutdown.trigger();
    gate.handle.await.unwrap().unwrap();
}
