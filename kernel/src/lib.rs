pub mod admission;
pub mod model;
pub mod repository;
