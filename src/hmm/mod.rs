pub mod context;
pub mod model;
pub mod tagger;
pub mod trainer;
