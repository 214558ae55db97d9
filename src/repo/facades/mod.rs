//! # Facade Module
//!
//! This module implements the **Facade** pattern, serving as an intermediate logic layer
//! between the application's public interface and the underlying database driver.
//!
//! The facade centralizes the guard checks performed before every table
//! operation and keeps the rest of the system away from raw SQL:
//!
//! * **Guarded operations:** every table-level operation re-checks table
//!   existence against the live catalog immediately before acting, and skips
//!   with a report instead of failing when the precondition does not hold.
//! * **Uniform instrumentation:** each operation runs inside the timing
//!   wrapper, so callers get one duration report per call.
//! * **Encapsulation:** callers exchange [`crate::types::Dataset`] values
//!   with high-level methods on [`FacadeTable`] rather than manipulating SQL
//!   statements and rows.

mod facade_error;
pub use facade_error::*;

mod facade_table;
pub use facade_table::*;
