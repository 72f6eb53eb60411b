mod channel;

mod clock;
pub use clock::MonotonicClock;

#[cfg(feature = "rand")]
mod nonce;
#[cfg(feature = "rand")]
pub use nonce::RandomNonces;
