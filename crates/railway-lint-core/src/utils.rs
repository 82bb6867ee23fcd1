//! Utility functions for rule implementations.

pub mod allowance;
pub mod template;

#[doc(inline)]
pub use allowance::{check_allow_with_reason, AllowCheck};
#[doc(inline)]
pub use template::render_template;
