pub mod error;
pub mod middleware;
pub mod models;
pub mod token;

pub use error::*;
pub use middleware::*;
pub use models::*;
pub use token::*;
