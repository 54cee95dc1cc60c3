//! Pal roster: three-layer architecture (domain, repository, service).
//!
//! Username decoding and seat id assignment live here; persistence goes
//! through the `PalRepository` trait so the service can run against SeaORM
//! or the in-memory mock.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;
pub mod username;

pub use repository::PalRepository;
pub use service::{PalService, PalServiceConfig};
