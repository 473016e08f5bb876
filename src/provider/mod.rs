//! Form configuration providers

mod file;
mod sample;
mod traits;

pub use file::FileProvider;
pub use sample::SampleProvider;
pub use traits::{ConfigProvider, ProviderError};

#[cfg(test)]
pub use traits::MockConfigProvider;
