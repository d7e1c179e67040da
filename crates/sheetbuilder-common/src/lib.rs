pub mod color;
pub mod coord;
pub mod error;
pub mod ident;
pub mod keyword;
pub mod value;

pub use color::*;
pub use coord::*;
pub use error::*;
pub use ident::*;
pub use keyword::*;
pub use value::*;
