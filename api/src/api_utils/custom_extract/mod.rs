pub mod caller;
pub mod json_extractor;
pub mod path_extractor;

pub use caller::*;
pub use json_extractor::*;
pub use path_extractor::*;
