pub mod build;
pub mod provision;
pub mod run;
pub mod versions;
