mod file;
pub use file::*;

mod encoder;
pub use encoder::*;

pub mod catalog;
pub use catalog::LogoCatalog;
