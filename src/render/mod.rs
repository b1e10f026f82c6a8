pub mod composer;
pub mod config;
pub mod coords;
pub mod lanes;
pub mod surface;
pub mod tracks;

pub use composer::{RenderedTimeline, Timeline, TrackSet};
pub use config::LayoutConfig;
pub use coords::x_position;
pub use lanes::{LaneAssignment, LaneRegistry};
pub use surface::{DrawingSurface, SvgCanvas};
