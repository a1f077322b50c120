//! REST client side of the pipeline: endpoints, envelopes and the fetcher

pub mod endpoint;
pub mod envelope;
pub mod fetcher;
pub mod source;
pub mod transport;

pub use endpoint::{Endpoint, Method, RequestParams};
pub use envelope::Envelope;
pub use fetcher::Fetcher;
pub use source::{EndpointSource, ListSource};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
