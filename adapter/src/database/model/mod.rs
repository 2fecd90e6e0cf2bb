pub mod reservation;
pub mod space;
