pub mod projects;
pub mod providers;
pub mod recommendations;
pub mod shuffle;
