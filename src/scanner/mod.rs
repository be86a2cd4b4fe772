mod walk;

pub use walk::{collect_unit_paths, collect_unit_paths_for};
