pub mod admin;
pub mod chapters;
pub mod health;
pub mod novels;
pub mod tags;
