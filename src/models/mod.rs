// src/models/mod.rs

pub mod chapter;
pub mod classroom;
pub mod log;
pub mod question;
pub mod reward;
pub mod user;
pub mod word;
