pub mod blend;
pub mod vertex;

pub use blend::*;
pub use vertex::*;
