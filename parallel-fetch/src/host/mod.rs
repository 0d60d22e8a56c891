//! Host APIs.
//!
//! - [`http`] - The transport seam and its reqwest implementation

pub mod http;

pub use http::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
