pub mod analyte;
pub mod enums;
pub mod record;

pub use analyte::*;
pub use enums::*;
pub use record::*;
