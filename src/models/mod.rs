mod brand;
pub use brand::*;

mod report;
pub use report::*;
