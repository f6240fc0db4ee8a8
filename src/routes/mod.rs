pub mod anecdotal_records;

pub mod catalog;

pub mod evaluations;

pub mod group_evaluations;

pub mod groups;

pub mod reports;

pub mod schools;

pub mod students;

pub mod system;

pub mod users;

pub use anecdotal_records::configure_anecdotal_record_routes;
pub use catalog::configure_catalog_routes;
pub use evaluations::configure_evaluation_routes;
pub use group_evaluations::configure_group_evaluation_routes;
pub use groups::configure_group_routes;
pub use reports::configure_report_routes;
pub use schools::configure_school_routes;
pub use students::configure_student_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
