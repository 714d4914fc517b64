pub mod traits;

#[cfg(test)]
pub(crate) mod mock;
