pub mod error;
pub mod model;
pub mod source;
pub mod value_object;
