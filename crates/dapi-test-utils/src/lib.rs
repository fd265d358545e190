//! Shared test utilities for the OpenDAPI validator workspace.
//!
//! A dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fakes`]: recording schema fetcher and document writer, a fixed capability
//! - [`repo`]: [`TestRepo`](repo::TestRepo) temporary document trees

pub mod fakes;
pub mod repo;

pub use fakes::{RecordingFetcher, RecordingWriter, StaticCapability};
pub use repo::TestRepo;
