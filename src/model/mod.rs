pub mod feed;
pub mod fixture;
