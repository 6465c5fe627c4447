pub mod byte_range;
pub mod client_config;
pub mod fetch_client;
pub mod fetch_error;
pub mod resource_metadata;

// 重导出公共类型
pub use byte_range::{ByteRange, ByteRanges};
pub use client_config::ClientConfig;
pub use fetch_client::FetchClient;
pub use fetch_error::FetchError;
pub use resource_metadata::ResourceMetadata;
