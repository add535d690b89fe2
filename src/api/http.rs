use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::backend::{RequestError, TutorBackend};
use crate::api::wire::{
    CodeRequest, HELP_PATH, HelpResponse, REFLECT_PATH, ReflectRequest, ReflectResponse, RUN_PATH,
    RunResponse,
};

/// `TutorBackend` over HTTP. Every call is a single JSON POST with no retry
/// and no timeout; the status code is not inspected, only the decoded body.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tutor_pad/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, RequestError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let response = self.client.post(&url).json(body).send().await?;
        debug!(%url, status = %response.status(), "backend replied");

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl TutorBackend for HttpBackend {
    async fn run(&self, request: CodeRequest) -> Result<RunResponse, RequestError> {
        self.post_json(RUN_PATH, &request).await
    }

    async fn help(&self, request: CodeRequest) -> Result<HelpResponse, RequestError> {
        self.post_json(HELP_PATH, &request).await
    }

    async fn reflect(&self, request: ReflectRequest) -> Result<ReflectResponse, RequestError> {
        self.post_json(REFLECT_PATH, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    struct Captured {
        head: String,
        body: String,
    }

    /// Accepts one connection, records the request, and answers with `reply`.
    async fn serve_once(reply: &'static str) -> (String, JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];

            let header_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "client closed before sending headers");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);

            while buf.len() < header_end + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                reply.len(),
                reply
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            Captured { head, body }
        });

        (format!("http://{}", addr), handle)
    }

    #[tokio::test]
    async fn run_posts_code_as_json() {
        let (base, server) = serve_once(r#"{"result":"All tests passed!"}"#).await;
        let backend = HttpBackend::new(base).unwrap();

        let reply = backend
            .run(CodeRequest {
                code: "X".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(reply.result, "All tests passed!");

        let captured = server.await.unwrap();
        assert!(captured.head.starts_with("POST /api/run HTTP/1.1"));
        assert!(
            captured
                .head
                .to_ascii_lowercase()
                .contains("content-type: application/json")
        );
        assert_eq!(captured.body, r#"{"code":"X"}"#);
    }

    #[tokio::test]
    async fn reflect_posts_explanation() {
        let (base, server) = serve_once(r#"{"feedback":"Nice base case."}"#).await;
        let backend = HttpBackend::new(format!("{}/", base)).unwrap();

        let reply = backend
            .reflect(ReflectRequest {
                code: "X".to_string(),
                explanation: "E".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(reply.feedback, "Nice base case.");

        let captured = server.await.unwrap();
        assert!(captured.head.starts_with("POST /api/reflect HTTP/1.1"));
        assert_eq!(captured.body, r#"{"code":"X","explanation":"E"}"#);
    }

    #[tokio::test]
    async fn non_json_body_is_a_request_error() {
        let (base, server) = serve_once("Internal Server Error").await;
        let backend = HttpBackend::new(base).unwrap();

        let err = backend
            .help(CodeRequest {
                code: "X".to_string(),
            })
            .await
            .unwrap_err();
        assert!(!err.message().is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn connection_refused_is_a_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::new(format!("http://{}", addr)).unwrap();
        let result = backend
            .run(CodeRequest {
                code: "X".to_string(),
            })
            .await;
        assert!(result.is_err());
    }
}
