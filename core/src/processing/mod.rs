pub mod canvas;
pub mod counter;
pub mod mapper;
pub mod overlay;

pub use canvas::Canvas;
pub use counter::{Direction, RepCount, RepCounter};
pub use mapper::{AngleMapper, AngleReading};
pub use overlay::OverlayRenderer;
