pub mod filesystem;

pub use filesystem::{write_new, write_replace, BackupStore, FileWriter, OutputWriter};
