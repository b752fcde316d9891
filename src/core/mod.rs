pub mod calendar;
pub mod catalog;
pub mod progression;
pub mod storage;
pub mod store;
