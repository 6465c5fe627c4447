pub mod http_request;
pub mod http_response;
pub mod reqwest_transport;
pub mod streaming_response;
pub mod transport_error;

// 重导出公共类型
pub use http_request::HttpRequest;
pub use http_response::HttpResponse;
pub use reqwest_transport::ReqwestTransport;
pub use streaming_response::{BodyStream, StreamingResponse};
pub use transport_error::TransportError;
