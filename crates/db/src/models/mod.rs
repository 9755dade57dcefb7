pub mod minisite;
pub mod project;
pub mod prospect;
pub mod prospect_event;

pub use minisite::Minisite;
pub use project::{CreateProject, Project};
pub use prospect::{CreateProspect, Prospect};
pub use prospect_event::ProspectEvent;
