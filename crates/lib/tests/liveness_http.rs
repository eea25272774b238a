//! Integration test: start the liveness endpoint on a free port, GET /,
//! assert the exact body. The server task is left running when the test ends.

use std::time::Duration;

use lib::liveness;

fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    listener.local_addr().expect("local_addr").port()
}

#[tokio::test]
async fn liveness_responds_with_the_fixed_body() {
    let port = free_port();

    tokio::spawn(async move {
        let _ = liveness::run_liveness("127.0.0.1", port).await;
    });

    let url = format!("http://127.0.0.1:{}/", port);
    let client = reqwest::Client::new();
    let mut last_err = None;
    for _ in 0..100 {
        match client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => {
                assert_eq!(resp.status().as_u16(), 200);
                let body = resp.text().await.expect("read body");
                assert_eq!(body, "Zpathconverter is alive!");

                // The router serves nothing else.
                let resp = client
                    .get(format!("http://127.0.0.1:{}/healthz", port))
                    .send()
                    .await
                    .expect("request unknown path");
                assert_eq!(resp.status().as_u16(), 404);
                return;
            }
            Ok(_) => {}
            Err(e) => last_err = Some(e),
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    panic!(
        "GET {} did not return the liveness body within 5s; last error: {:?}",
        url, last_err
    );
}
