// Adapters layer: concrete implementations for external systems (http transport, response normalization).

pub mod http;
pub mod normalizing;

pub use http::HttpTransport;
pub use normalizing::NormalizingService;
