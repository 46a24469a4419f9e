#![forbid(unsafe_code)]

pub mod engine;
pub mod facets;
pub mod filter;
pub mod metrics;
pub mod records;
pub mod upload;
pub mod view;
pub mod vocab;

pub use engine::{Engine, filter_and_select};
pub use facets::FacetState;
pub use filter::PartitionPolicy;
pub use records::{DatasetName, DatasetRegistry, MemoryRegistry, Record};
pub use view::{ViewResult, ViewState, ViewVariant};
