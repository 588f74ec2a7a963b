pub mod availability;
pub mod handlers;
pub mod models;
pub mod repository;

pub use availability::*;
pub use handlers::*;
pub use models::*;
pub use repository::*;
