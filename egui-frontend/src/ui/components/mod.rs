pub mod fonts;
pub mod form_panel;
pub mod receipt_panel;
