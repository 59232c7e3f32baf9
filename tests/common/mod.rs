//! Shared utilities for integration tests.

use std::io;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use tracing_subscriber::fmt::MakeWriter;

use delayed_return::delay::DELAYED_TIME_HEADER;
use delayed_return::pipeline::{StageEvent, X_REQUEST_ID};
use delayed_return::processor::AllHeaders;

/// Request headers carrying an optional `delayed-time` and a fixed request id.
pub fn request_headers(request_id: &str, delayed_time: Option<&str>) -> AllHeaders {
    let mut headers = AllHeaders::new();
    headers.insert(X_REQUEST_ID, request_id.to_string());
    if let Some(value) = delayed_time {
        headers.insert(DELAYED_TIME_HEADER, value.to_string());
    }
    headers
}

/// A full six-stage exchange.
pub fn exchange(request_id: &str, delayed_time: Option<&str>) -> Vec<StageEvent> {
    StageEvent::exchange(
        request_headers(request_id, delayed_time),
        Bytes::from_static(b"{\"ping\":true}"),
    )
}

/// In-memory sink for log lines emitted during a test.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl LogCapture {
    /// Install as the thread's default subscriber until the guard drops.
    ///
    /// Only sees events from the current thread, so pair it with the
    /// current-thread runtime `#[tokio::test]` uses by default.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        let buf = self.0.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Log lines containing every given fragment.
    pub fn lines_with(&self, fragments: &[&str]) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| fragments.iter().all(|f| line.contains(f)))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
