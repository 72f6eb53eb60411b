// Implementations that need the operating system: wall-clock time,
//  entropy for nonces and threads to hand Interests to.
mod native;
pub use native::*;
