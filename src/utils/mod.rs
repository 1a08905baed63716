pub mod fs;

pub use fs::{collect_files, read_text, write_text};
