pub mod error;
pub mod handlers;
pub mod responses;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::ApiState;
