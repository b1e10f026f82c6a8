pub mod coded;
pub mod command;
pub mod feature;
pub mod time;

pub use coded::{CodedSegment, CodingPolicy, ForkAnnotation, ForkSuccess, ForkType};
pub use command::InteractionEvent;
pub use feature::{FeatureCoding, FeatureType};
pub use time::{duration, parse_timestamp, TimePoint};
