pub mod config;
pub mod cursor;
pub mod fusion;
pub mod navigator;
pub mod social;
