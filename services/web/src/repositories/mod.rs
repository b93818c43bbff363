//! PostgreSQL implementations of the data-access contracts

pub mod snippet;
pub mod user;

pub use snippet::SnippetRepository;
pub use user::UserRepository;
