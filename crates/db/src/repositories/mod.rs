pub mod minisite_repo;
pub mod project_repo;
pub mod prospect_event_repo;
pub mod prospect_repo;

pub use minisite_repo::MinisiteRepo;
pub use project_repo::ProjectRepo;
pub use prospect_event_repo::ProspectEventRepo;
pub use prospect_repo::ProspectRepo;
