pub mod client;
pub mod models;

pub use client::FinsageClient;
pub use models::{GraphResponse, RawRecord};
