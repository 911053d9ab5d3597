mod cache;
mod load;
mod model;

pub use cache::RelatedCache;
pub use load::load_dataset;
pub use model::{CategoryGraph, CategoryGroup, CategoryNode, RelatedStack, RelationDataset, StackEntity};
