//! Selection model and category-ordered navigation.

pub mod category;
pub mod model;
