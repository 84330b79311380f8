pub mod breaks;
pub mod compute;
pub mod export;
pub mod speakers;
