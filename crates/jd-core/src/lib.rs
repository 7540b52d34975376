//! jd-core: shared foundation for joint dynamics effect models.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - joints (ordered, named joint sets that fix vector layout)
//! - error (shared error types)

pub mod error;
pub mod joints;
pub mod numeric;

pub use error::{CoreError, CoreResult};
pub use joints::JointSet;
pub use numeric::*;
