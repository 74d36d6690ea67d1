//! Authentication

mod identity;
mod session;
mod store;
mod token;
mod tokens;

pub use identity::IdentityFlow;
pub use session::Credentials;
pub use session::Session;
pub use store::FileTokenStore;
pub use store::MemoryTokenStore;
pub use store::TokenStore;
pub use token::AccessToken;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
pub use tokens::SessionTokens;
