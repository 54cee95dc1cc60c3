//! Service layer for the Pal roster.
//! - Separates business logic from data access.
//! - Reuses entity definitions in the `models` crate.
//! - Returns the `{code, message, body}` envelope from every operation.

pub mod errors;
pub mod pal;
pub mod response;
#[cfg(test)]
pub mod test_support;
