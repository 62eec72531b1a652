//! In-memory bank accounts with overdraft and per-operation debit limits.
//!
//! The domain lives in [`domain`]: a [`Person`] owns any number of
//! [`Account`]s, each validating its credits, debits, transfers and limit
//! changes before touching the balance. The remaining modules form a small
//! replay pipeline used by the binary: CSV [`ingestion`] feeds the
//! [`engine`], which applies operations to an [`output_repository`] and sends
//! rejections to the [`dlq`].

pub mod dlq;
pub mod domain;
pub mod engine;
pub mod ingestion;
pub mod output_repository;

pub use domain::{Account, Amount, Error, Person, Reason};
