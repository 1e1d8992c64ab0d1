//! Persistence layer for the user table

mod users;

pub use users::UserRepository;
