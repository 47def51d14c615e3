pub mod app_implementation;
pub mod app_state;
pub mod components;
pub mod entry_form;

pub use app_state::WritingReceiptApp;
