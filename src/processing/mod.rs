//! Image conversion.
//!
//! - [`WebpEncoder`]: decodes one PNG and re-encodes it as WebP.
//! - [`BatchExecutor`]: runs an encoder over a batch concurrently, all-or-nothing.

mod encoder;
mod executor;
#[cfg(test)]
pub(crate) mod testing;

pub use encoder::{ImageEncoder, WebpEncoder};
pub use executor::BatchExecutor;
