//! User entity module: registration, login and token authentication

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod provider;

pub use descriptor::{UserDescriptor, public_routes};
pub use model::{AuthToken, LoginInput, RegisterInput, User, UserProfile};
pub use provider::TokenAuthProvider;
