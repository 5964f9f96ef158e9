pub mod persona;
pub mod portfolio;
pub mod resume;
pub mod user;
