mod entry;
mod feedback;
mod ranking;

pub use entry::*;
pub use feedback::*;
pub use ranking::*;
