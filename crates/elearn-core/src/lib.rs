//! elearn-core: Domain model, assessment engine, and attempt ledger.
//!
//! This crate holds the student record and assessment lifecycle:
//! enrollment, test papers, grading, the attempt cap, and certification.
//! Storage is abstracted behind [`store::DomainStore`].

pub mod accounts;
pub mod admin;
pub mod assessment;
pub mod catalog;
pub mod certification;
pub mod dashboard;
pub mod enrollment;
pub mod error;
pub mod ledger;
pub mod model;
pub mod question_bank;
pub mod store;

pub use error::{ElearnError, StorageError};
pub use model::Dataset;
pub use store::{DomainStore, UnitOfWork};
