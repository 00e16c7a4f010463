//! Page layout and the two chart views.

pub mod layout;
pub mod pie;
pub mod scatter;
