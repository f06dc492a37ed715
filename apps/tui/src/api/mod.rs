pub mod client;
pub mod error;
pub mod records;
pub mod token;

pub use client::{ApiClient, ApiConfig};
pub use error::ApiError;
pub use records::{Alert, Sighting};
pub use token::{EnvToken, StaticToken, TokenFile, TokenSource};
