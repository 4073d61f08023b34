pub mod flock_mapper;
