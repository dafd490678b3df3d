// Service exports
pub mod eventbrite;
pub mod events_client;
pub mod session_runner;
pub mod storage;

pub use eventbrite::{EventbriteClient, UpstreamError, VerifiedUser};
pub use events_client::{EventSuggester, EventsProxyClient, FetchError};
pub use session_runner::SessionRunner;
pub use storage::{FileStore, KeyValueStore, MemoryStore, SessionStorage, StorageError};
