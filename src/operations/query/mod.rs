mod is_valid;
mod locate;

pub use is_valid::IsValid;
pub use locate::{Locate, Location};
