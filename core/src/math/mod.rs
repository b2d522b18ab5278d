pub mod angle;
pub mod interp;

pub use angle::AngleHelper;
pub use interp::InterpHelper;
