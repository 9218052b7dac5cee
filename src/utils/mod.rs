pub mod clock;
pub mod console;
pub mod dir;
pub mod logging;
pub mod percentage;
pub mod prompt;
pub mod runtime;
pub mod time;
