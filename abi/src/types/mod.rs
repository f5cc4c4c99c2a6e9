mod outcome;
mod row;
mod summary;

pub use outcome::*;
pub use summary::*;
