//! Analytics sinks wired into the HTTP server.

use std::sync::Arc;

use card::{AnalyticsEvent, AnalyticsSink};
use tracing::{debug, info, warn};

/// Writes each event as a structured log line.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn emit(&self, event: AnalyticsEvent) {
        info!(
            target: "analytics",
            event_id = %event.id,
            action = %event.action,
            subject = %event.subject,
            "analytics event"
        );
    }
}

/// Forwards events to a collector endpoint on a detached task.
#[derive(Clone, Debug)]
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl AnalyticsSink for HttpSink {
    fn emit(&self, event: AnalyticsEvent) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!(action = %event.action, "no runtime; analytics event dropped");
            return;
        };
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        handle.spawn(async move {
            let result = client
                .post(&endpoint)
                .json(&event)
                .send()
                .await
                .and_then(|response| response.error_for_status());
            if let Err(err) = result {
                warn!(error = %err, action = %event.action, "analytics delivery failed");
            }
        });
    }
}

pub fn build_sink(endpoint: Option<&str>) -> Arc<dyn AnalyticsSink> {
    match endpoint {
        Some(endpoint) => {
            info!(endpoint, "forwarding analytics events");
            Arc::new(HttpSink::new(endpoint))
        }
        None => Arc::new(TracingSink),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{
            Mutex,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
    use card::ActionId;
    use serde_json::Value;
    use tokio::sync::mpsc;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    type CollectorState = (Arc<AtomicUsize>, mpsc::UnboundedSender<Value>, StatusCode);

    async fn collect(
        State((hits, tx, status)): State<CollectorState>,
        Json(body): Json<Value>,
    ) -> StatusCode {
        hits.fetch_add(1, Ordering::SeqCst);
        let _ = tx.send(body);
        status
    }

    /// Starts a collector answering every POST with `status`.
    async fn spawn_collector(
        status: StatusCode,
    ) -> (String, Arc<AtomicUsize>, mpsc::UnboundedReceiver<Value>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::unbounded_channel();
        let router = Router::new()
            .route("/events", post(collect))
            .with_state((hits.clone(), tx, status));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (format!("http://{addr}/events"), hits, rx)
    }

    async fn wait_for_log(logs: &CapturedLogs, needle: &str) -> bool {
        for _ in 0..100 {
            if logs.contents().contains(needle) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        false
    }

    #[test]
    fn http_sink_without_runtime_drops_the_event() {
        let (logs, _guard) = capture_logs();
        let sink = HttpSink::new("http://127.0.0.1:9/events");
        sink.emit(AnalyticsEvent::new(ActionId::ClickEmail, "Ana"));
        assert!(logs.contents().contains("no runtime; analytics event dropped"));
    }

    #[tokio::test]
    async fn delivered_events_carry_action_and_subject() {
        let (logs, _guard) = capture_logs();
        let (endpoint, hits, mut rx) = spawn_collector(StatusCode::NO_CONTENT).await;
        let sink = build_sink(Some(&endpoint));
        sink.emit(AnalyticsEvent::new(ActionId::ClickWhatsapp, "Ana"));

        let body = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(body["action"], "click_whatsapp");
        assert_eq!(body["subject"], "Ana");
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!logs.contents().contains("analytics delivery failed"));
    }

    #[tokio::test]
    async fn collector_errors_are_logged_once_without_retry() {
        let (logs, _guard) = capture_logs();
        let (endpoint, hits, mut rx) =
            spawn_collector(StatusCode::INTERNAL_SERVER_ERROR).await;
        let sink = HttpSink::new(endpoint);
        sink.emit(AnalyticsEvent::new(ActionId::PageView, "Ana"));

        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(wait_for_log(&logs, "analytics delivery failed").await);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(logs.contents().matches("analytics delivery failed").count(), 1);
    }

    #[tokio::test]
    async fn unreachable_collector_is_logged_not_raised() {
        let (logs, _guard) = capture_logs();
        let sink = build_sink(Some("http://127.0.0.1:9/events"));
        sink.emit(AnalyticsEvent::new(ActionId::PageView, "Ana"));
        assert!(wait_for_log(&logs, "analytics delivery failed").await);
    }
}
