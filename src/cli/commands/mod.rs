//! CLI command implementations.

mod config;
mod doctor;
mod grade;
mod index;
mod init;
mod lessons;
mod list;
mod search;

pub use config::run_config;
pub use doctor::run_doctor;
pub use grade::run_grade;
pub use index::run_index;
pub use init::run_init;
pub use lessons::run_lessons;
pub use list::run_list;
pub use search::run_search;
