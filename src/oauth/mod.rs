mod handler;
mod storage;
mod token;

pub(crate) use handler::TokenHandler;
pub(crate) use storage::TokenStore;
pub use token::Token;
