mod beatmap;
mod difficulty;
mod timeline;

pub use beatmap::*;
pub use difficulty::*;
pub use timeline::*;
