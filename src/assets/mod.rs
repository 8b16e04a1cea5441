pub mod sources;

pub use sources::{read_entire_file, SourceError};
