pub mod types;
pub mod notation;
pub mod board;
pub mod attack;
pub mod legality;
pub mod verdict;
pub mod batch;
