pub mod commands;
pub mod entry_service;
pub mod export_service;
pub mod insight_service;
pub mod mappers;
pub mod models;
pub mod receipt_service;
