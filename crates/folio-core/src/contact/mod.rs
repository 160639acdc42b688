//! Contact form: validation, deep-link templates, feedback copy and the
//! submission flow that ties them together.

mod celebrate;
mod error;
mod feedback;
mod flow;
mod template;
mod validate;

pub use celebrate::*;
pub use error::*;
pub use feedback::*;
pub use flow::*;
pub use template::*;
pub use validate::*;
