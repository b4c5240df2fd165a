pub mod entry;

pub use entry::{DayEntry, EntryField};
