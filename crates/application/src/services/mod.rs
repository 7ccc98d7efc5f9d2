//! Application services

mod screening_service;

pub use screening_service::ScreeningService;
