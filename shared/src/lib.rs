//! Wire types shared between the novel backend and its clients.

pub mod api;
pub mod models;
