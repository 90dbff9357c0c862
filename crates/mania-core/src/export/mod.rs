mod console;

pub use console::*;
