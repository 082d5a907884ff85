//! Generation backend providers.

mod http_provider;

pub use http_provider::HttpGenerationBackend;
