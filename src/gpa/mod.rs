// Weighted GPA aggregation and rankings

pub mod calculator;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use calculator::*;
pub use handlers::*;
pub use models::*;
pub use repository::*;
pub use service::*;
