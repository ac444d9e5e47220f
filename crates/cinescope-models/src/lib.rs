pub mod genre;
pub mod movie;
pub mod movie_details;
pub mod paginated;

pub use genre::{Genre, GenreList};
pub use movie::{Movie, POSTER_SIZE};
pub use movie_details::MovieDetails;
pub use paginated::Paginated;
