// Authentication module
// Password registration and login, HS256 bearer tokens, and the request guard

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{login_handler, me_handler, register_handler};
pub use middleware::{require_auth, AuthenticatedUser};
pub use models::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse, User, UserResponse};
pub use repository::UserRepository;
pub use service::AuthService;
pub use token::TokenService;
