pub mod aggregation;
pub mod changes;
pub mod entities;
pub mod lesson_plan;
pub mod reconcile;
pub mod requests;
pub mod responses;
pub mod timeline;
