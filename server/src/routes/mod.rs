pub mod meta;
pub mod sales;
pub mod trends;
