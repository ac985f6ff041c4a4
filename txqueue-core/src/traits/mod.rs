pub use executor::*;
pub use store::*;

mod executor;
mod store;
