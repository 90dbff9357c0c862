mod clock;
mod engine;
mod enums;
mod hit_window;
mod result;
mod session;
mod tracker;

pub use clock::*;
pub use engine::*;
pub use enums::*;
pub use hit_window::*;
pub use result::*;
pub use session::*;
pub use tracker::*;
