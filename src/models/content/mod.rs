pub mod defaults;
pub mod export;
pub mod merge;
pub mod modules;
pub mod page;
pub mod rsvp;
pub mod types;

pub use defaults::default_document;
pub use merge::merge_over_defaults;
pub use modules::ModuleData;
pub use page::PageView;
pub use rsvp::{NewRsvp, RsvpSummary};
pub use types::*;
