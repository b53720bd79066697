pub mod assets;
pub mod client;
pub mod dto;
pub mod types;
pub mod urls;

pub use assets::AssetResolver;
pub use client::PortalClient;
pub use dto::*;
pub use types::{ApiError, ContentApi, FieldErrors};
