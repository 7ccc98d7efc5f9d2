//! HTTP request handlers

pub mod health;
pub mod index;
pub mod models;
pub mod screen;
