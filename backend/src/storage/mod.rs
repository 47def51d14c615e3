pub mod json;
pub mod memory;
pub mod traits;

pub use json::{EntryRepository, JsonConnection};
pub use memory::MemoryEntryStorage;
pub use traits::EntryStorage;
