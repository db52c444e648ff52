pub mod analyze;
pub mod catalog;
pub mod check;
pub mod recommend;
pub mod socket;
