pub mod filters;
pub mod import;
pub mod sale;
pub mod trend;

pub use filters::*;
pub use import::*;
pub use sale::*;
pub use trend::*;
