pub mod http;
pub mod logging;

pub use http::{http_server, init_store};
pub use logging::{LogRotation, LoggingConfig, LoggingGuard, init_logging};
