pub mod errors;
pub mod shutdown;
pub mod time;
pub mod validations;

pub use errors::*;
pub use shutdown::*;
pub use time::*;
pub use validations::*;
