pub mod context;
pub mod guard;
pub mod token;

pub use context::AuthContext;
pub use token::Claims;
