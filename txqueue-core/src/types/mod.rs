pub use record::*;

mod record;
