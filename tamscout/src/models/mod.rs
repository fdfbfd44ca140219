mod industry;
mod keyword;
mod research;

pub use industry::*;
pub use keyword::*;
pub use research::*;
