//! Resilient fetching of the Primary and Secondary roster sources.

pub mod endpoint;
pub mod error;
pub mod fetcher;
pub mod retry;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod transport;

pub use endpoint::{Endpoint, EndpointKey, accept, endpoints};
pub use error::{FetchError, FetchFailure, Result};
pub use fetcher::{RawPayload, SourceFetcher};
pub use retry::{RetryPolicy, RetryState, Sleeper, ThreadSleeper};
pub use transport::{ReqwestTransport, Transport, TransportResponse};
