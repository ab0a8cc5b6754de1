pub mod charset;
pub mod client;
pub mod errors;
pub mod render;
pub mod types;

pub use client::fetch;
pub use errors::FetchError;
pub use types::{Charset, PageResponse};
