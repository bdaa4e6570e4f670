//! # Contracts
//!
//! Frozen interface contracts (ICD), defining the capability traits and data
//! structures shared between the gating components and the host runtime.
//! All business crates can only depend on this crate, reverse dependencies
//! are prohibited.
//!
//! ## Runtime Model
//! - The host runtime resolves dependencies by name and injects them as a
//!   [`Dependencies`] container
//! - Calls carry a [`CallContext`]; the data-capture service marks its calls
//!   with the `fromDataManagement` flag
//! - "Outside the configured window" is signaled with
//!   [`ContractError::NoCaptureToStore`], which is a skip, not a failure

mod capability;
mod context;
mod dependencies;
mod error;
mod registry;
mod resource_name;

pub use capability::*;
pub use context::{CallContext, FROM_DATA_MANAGEMENT_KEY};
pub use dependencies::{Dependencies, Resource};
pub use error::*;
pub use registry::*;
pub use resource_name::ResourceName;
