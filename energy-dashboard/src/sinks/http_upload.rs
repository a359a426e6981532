use std::time::{Duration, Instant};

use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};

use super::{UploadError, UploadGateway};
use crate::{config::BackendConfig, sources::fingerprint};

/// Multipart upload to the energy backend.
///
/// A single request per call, bounded by the client timeout. Only HTTP 200
/// counts as success; every other status is returned with its body.
pub struct HttpUploadGateway {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpUploadGateway {
    pub fn new<U: Into<String>>(url: U, timeout: Duration) -> Result<Self, UploadError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UploadError::Client(e.to_string()))?;

        Ok(Self::with_client(client, url, timeout))
    }

    /// Use a prepared client; `timeout` must match the one it was built with.
    pub fn with_client<U: Into<String>>(client: Client, url: U, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(cfg: &BackendConfig) -> Result<Self, UploadError> {
        Self::new(cfg.upload_url.clone(), cfg.timeout())
    }

    fn classify(&self, e: reqwest::Error) -> UploadError {
        if e.is_timeout() {
            UploadError::Timeout(self.timeout)
        } else if e.is_connect() {
            UploadError::Connect(e.to_string())
        } else {
            UploadError::Transport(e.to_string())
        }
    }

    async fn send(&self, file_name: &str, bytes: Vec<u8>) -> Result<(), UploadError> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        Err(UploadError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait::async_trait]
impl UploadGateway for HttpUploadGateway {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<(), UploadError> {
        let size_bytes = bytes.len();
        let digest = fingerprint(&bytes);
        let started = Instant::now();
        metrics::counter!("backend_upload_requests_total").increment(1);

        let res = self.send(file_name, bytes).await;
        metrics::histogram!("backend_upload_latency_seconds")
            .record(started.elapsed().as_secs_f64());

        match &res {
            Ok(()) => tracing::info!(
                url = %self.url,
                file_name,
                size_bytes,
                fingerprint = %digest,
                "upload to backend succeeded"
            ),
            Err(e) => {
                metrics::counter!("backend_upload_failures_total").increment(1);
                tracing::error!(
                    error = %e,
                    url = %self.url,
                    file_name,
                    fingerprint = %digest,
                    "upload to backend failed"
                );
            }
        }

        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Multipart, http::StatusCode as AxumStatus, routing::post, Router};
    use std::net::SocketAddr;

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app.into_make_service()).await;
        });
        addr
    }

    async fn echo_file_field(mut multipart: Multipart) -> (AxumStatus, String) {
        while let Ok(Some(field)) = multipart.next_field().await {
            if field.name() == Some("file") {
                let name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.unwrap_or_default();
                if name == "usage.csv" && data.as_ref() == b"timestamp\n" {
                    return (AxumStatus::OK, "stored".to_string());
                }
            }
        }
        (AxumStatus::BAD_REQUEST, "missing file field".to_string())
    }

    // Loopback stubs must not be routed through a proxy from the environment.
    fn gateway(addr: SocketAddr, timeout: Duration) -> HttpUploadGateway {
        let client = Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .expect("client");
        HttpUploadGateway::with_client(client, format!("http://{addr}/energy/upload"), timeout)
    }

    #[tokio::test]
    async fn upload_sends_bytes_as_file_field() {
        let addr = serve(Router::new().route("/energy/upload", post(echo_file_field))).await;
        let res = gateway(addr, Duration::from_secs(5))
            .upload("usage.csv", b"timestamp\n".to_vec())
            .await;
        assert_eq!(res, Ok(()));
    }

    #[tokio::test]
    async fn server_error_reports_status_and_body() {
        let app = Router::new().route(
            "/energy/upload",
            post(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "database unavailable") }),
        );
        let addr = serve(app).await;

        let res = gateway(addr, Duration::from_secs(5))
            .upload("usage.csv", b"timestamp\n".to_vec())
            .await;
        assert_eq!(
            res,
            Err(UploadError::Status {
                status: 500,
                body: "database unavailable".to_string()
            })
        );
    }

    #[tokio::test]
    async fn non_200_success_codes_are_failures() {
        let app = Router::new().route("/energy/upload", post(|| async { AxumStatus::CREATED }));
        let addr = serve(app).await;

        let res = gateway(addr, Duration::from_secs(5))
            .upload("usage.csv", b"timestamp\n".to_vec())
            .await;
        assert!(matches!(res, Err(UploadError::Status { status: 201, .. })));
    }

    #[tokio::test]
    async fn refused_connection_is_reported() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let res = gateway(addr, Duration::from_secs(5))
            .upload("usage.csv", b"timestamp\n".to_vec())
            .await;
        let err = res.expect_err("nothing is listening");
        assert!(err.user_message().starts_with("Connection error:"));
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let app = Router::new().route(
            "/energy/upload",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let addr = serve(app).await;

        let res = gateway(addr, Duration::from_millis(200))
            .upload("usage.csv", b"timestamp\n".to_vec())
            .await;
        assert_eq!(res, Err(UploadError::Timeout(Duration::from_millis(200))));
    }
}
