pub mod duration;
pub mod generate;
pub mod pipeline;
pub mod youtube;

pub use generate::*;
pub use pipeline::*;
pub use youtube::*;
