pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, Jwt, TokenPair};
pub use middleware::{require_auth, role_guard, CurrentAccount};
pub use password::{hash_password, verify_password};
