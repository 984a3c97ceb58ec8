pub mod diff_range;
pub mod indentation;
pub mod line_ending;
pub mod path_segment;
pub mod scheme;
pub mod transform_context;
pub mod transform_step;
