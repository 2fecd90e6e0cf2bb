pub mod health;
pub mod memory;
pub mod reservation;
pub mod space;
