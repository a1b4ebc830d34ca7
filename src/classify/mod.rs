//! Severity classification and internal-frame filtering.
//!
//! Both run after decoding and before grouping:
//! - `severity` assigns each entry a 1-3 rank from its own fields
//! - `internals` drops entries located in runtime-internal scripts

pub mod internals;
pub mod severity;

pub use internals::{is_internal_path, InternalFilter};
pub use severity::{classify, code_severity, deopt_severity, ic_severity};
