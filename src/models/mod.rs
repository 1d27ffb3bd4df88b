pub mod criteria;
pub mod product;

pub use criteria::*;
pub use product::*;
