pub mod connection;
pub mod flock_repository;

pub use connection::JsonConnection;
pub use flock_repository::FlockRepository;
