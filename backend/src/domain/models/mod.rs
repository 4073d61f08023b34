pub mod flock;
