//! Scripted station source for testing without API access.
//!
//! Replies are queued up front and handed out one per call, in order. Once
//! the script runs out every further call times out.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::client::StationDto;
use super::error::StationError;
use super::source::StationSource;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 2xx with these stations
    Stations(Vec<StationDto>),
    /// 2xx with an empty body
    EmptyBody,
    /// Client timeout
    Timeout,
    /// Non-2xx status with a body
    Status(u16, String),
}

impl MockReply {
    fn into_result(self) -> Result<Vec<StationDto>, StationError> {
        match self {
            MockReply::Stations(stations) => Ok(stations),
            MockReply::EmptyBody => Err(StationError::EmptyBody),
            MockReply::Timeout => Err(StationError::Timeout),
            MockReply::Status(401 | 403, _) => Err(StationError::Unauthorized),
            MockReply::Status(status, message) => Err(StationError::Api { status, message }),
        }
    }
}

/// Station source that replays a fixed script.
#[derive(Debug, Default)]
pub struct MockStationSource {
    replies: Mutex<VecDeque<MockReply>>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl MockStationSource {
    /// Create a source that answers with `replies` in order.
    pub fn new(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// A source that always answers with the same stations.
    pub fn always(stations: Vec<StationDto>, times: usize) -> Self {
        Self::new(std::iter::repeat_n(MockReply::Stations(stations), times))
    }

    /// Number of fetches made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Remote line ids requested so far, in call order.
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn next_reply(&self, remote_line: &str) -> MockReply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(remote_line.to_string());
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut q| q.pop_front())
            .unwrap_or(MockReply::Timeout)
    }
}

impl StationSource for MockStationSource {
    fn fetch_line(
        &self,
        remote_line: &str,
    ) -> impl Future<Output = Result<Vec<StationDto>, StationError>> + Send {
        let reply = self.next_reply(remote_line);
        async move { reply.into_result() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokyo() -> StationDto {
        StationDto {
            same_as: "odpt.Station:JR-East.Yamanote.Tokyo".to_string(),
            title: Some("東京".to_string()),
            lat: Some(35.681236),
            long: Some(139.767125),
        }
    }

    #[tokio::test]
    async fn replays_in_order_then_times_out() {
        let source = MockStationSource::new([
            MockReply::Status(500, "boom".to_string()),
            MockReply::Stations(vec![tokyo()]),
        ]);

        assert!(matches!(
            source.fetch_line("L").await,
            Err(StationError::Api { status: 500, .. })
        ));
        assert_eq!(source.fetch_line("L").await.unwrap(), vec![tokyo()]);
        assert!(matches!(source.fetch_line("L").await, Err(StationError::Timeout)));
        assert_eq!(source.calls(), 3);
        assert_eq!(source.requested(), ["L", "L", "L"]);
    }

    #[tokio::test]
    async fn auth_statuses_map_to_unauthorized() {
        let source = MockStationSource::new([MockReply::Status(403, String::new())]);
        assert!(matches!(
            source.fetch_line("L").await,
            Err(StationError::Unauthorized)
        ));
    }
}
