pub mod session;
pub mod token;

pub use session::UserSession;
pub use token::StaticToken;
