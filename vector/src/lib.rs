mod error;
pub mod plot;
mod scalar;
mod vector;

pub use error::VectorError;
pub use plot::{Figure, NullPlotter, Plotter};
pub use scalar::Scalar;
pub use vector::Vector;
