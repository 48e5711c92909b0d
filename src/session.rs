mod order;
mod store;

pub use order::*;
pub use store::*;
