pub mod draws;
pub mod results;
pub mod side_names;
