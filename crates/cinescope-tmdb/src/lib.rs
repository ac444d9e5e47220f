pub mod client;
pub mod error;
pub mod movies;
pub mod traits;

pub use client::TmdbClient;
pub use error::TmdbError;
pub use movies::POPULARITY_DESC;
pub use traits::MovieSource;

pub type Result<T> = std::result::Result<T, TmdbError>;
