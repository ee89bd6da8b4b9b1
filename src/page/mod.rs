/// Pages, articles, and their sizing options.
pub mod model;
