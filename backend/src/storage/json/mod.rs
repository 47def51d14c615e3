pub mod connection;
pub mod entry_repository;

pub use connection::JsonConnection;
pub use entry_repository::EntryRepository;
