pub mod analyst;
pub mod builds;
pub mod catalog;
pub mod posts;
pub mod recommend;
pub mod socket;
