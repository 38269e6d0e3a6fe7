//! Service layer over the producto store.
//! - Separates storage access from the HTTP handlers.
//! - Reuses entity definitions and field checks from the `models` crate.

pub mod errors;
pub mod producto;
#[cfg(test)]
pub mod test_support;
