pub mod commands;
pub mod features;
pub mod foraging;
pub mod methods;
pub mod patches;

pub use commands::{classify, draw_command_ticks, CommandCategory};
pub use features::{draw_feature_types, feature_style};
pub use foraging::draw_coded_columns;
pub use methods::{method_name, MethodSpanTrack, VisitSpan};
pub use patches::draw_patches;
