pub mod details;
pub mod favourites;
pub mod handlers;
pub mod middleware;
pub mod movies;
pub mod routes;
pub mod search;

pub use routes::create_router;
