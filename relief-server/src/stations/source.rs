//! Abstraction over where remote station lists come from.

use std::future::Future;
use std::sync::Arc;

use super::client::StationDto;
use super::error::StationError;

/// Something that can fetch the raw station list of a remote line.
///
/// Implemented by the HTTP client, the caching wrapper and the scripted mock
/// used in tests. Failures come back as values so the resolver can decide
/// between retrying and falling back.
pub trait StationSource: Send + Sync {
    fn fetch_line(
        &self,
        remote_line: &str,
    ) -> impl Future<Output = Result<Vec<StationDto>, StationError>> + Send;
}

impl<S: StationSource> StationSource for Arc<S> {
    fn fetch_line(
        &self,
        remote_line: &str,
    ) -> impl Future<Output = Result<Vec<StationDto>, StationError>> + Send {
        S::fetch_line(self.as_ref(), remote_line)
    }
}
