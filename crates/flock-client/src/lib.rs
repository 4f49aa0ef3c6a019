//! # Flock Client
//!
//! REST access to the congregation backend: generic CRUD resources whose
//! writes come back as form [`SubmitResult`](flock_core::SubmitResult)s,
//! and the option source used by remote selects.

pub mod client;
pub mod error;
pub mod options;
pub mod resource;

pub use client::{interpret_response, ApiClient};
pub use error::{ClientError, ClientResult};
pub use options::{parse_options, HttpOptionSource};
pub use resource::{Resource, ResourceSubmitter};
