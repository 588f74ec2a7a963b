pub mod eligibility;
pub mod error;
pub mod handlers;
pub mod models;
pub mod rating;
pub mod repository;
pub mod service;

pub use eligibility::*;
pub use error::*;
pub use handlers::*;
pub use models::*;
pub use rating::*;
pub use repository::*;
pub use service::*;
