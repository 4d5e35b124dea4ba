pub mod error;
pub mod naming;
pub mod taxonomy;
pub mod tree;
pub mod value;

pub use error::KiteError;
pub use naming::safe_name;
pub use tree::*;
pub use value::*;
