pub mod games;
pub mod sagas;
pub mod sgdb;
