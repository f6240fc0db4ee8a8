pub mod builders;
pub mod entities;
pub mod requests;
pub mod responses;
