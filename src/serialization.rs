//! Serialization of fitted parameters.
//!
//! Fitted models and transformers expose their learned state as a plain
//! parameter struct; anything that is `serde`-compatible gets a `bincode`
//! byte encoding through the blanket impl below.

use std::error::Error;
use std::path::Path;

/// A parameter representation that can be converted to and from bytes.
///
/// Implementors should hold only plain numerical data (vectors, scalars,
/// flags), never solver state or matrices tied to a particular fit.
pub trait SerializableParams: Sized {
    /// The error type returned during (de)serialization.
    type Error: Error + Send + Sync + 'static;

    /// Serialize the parameters into a byte buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Deserialize the parameters from a byte buffer.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;
}

impl<T> SerializableParams for T
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    type Error = bincode::Error;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        bincode::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        bincode::deserialize(bytes)
    }
}

/// Writes `params` to `path` in their byte encoding.
pub fn save_params<T: SerializableParams, P: AsRef<Path>>(
    params: &T,
    path: P,
) -> crate::Result<()> {
    let bytes = params
        .to_bytes()
        .map_err(|e| crate::LinearLabError::Serialization(e.to_string()))?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Reads parameters previously written by [`save_params`].
pub fn load_params<T: SerializableParams, P: AsRef<Path>>(path: P) -> crate::Result<T> {
    let bytes = std::fs::read(path)?;
    T::from_bytes(&bytes).map_err(|e| crate::LinearLabError::Serialization(e.to_string()))
}
