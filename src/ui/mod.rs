//! Screen state for the student client, independent of how it is drawn.

pub mod chat;
pub mod dashboard;
pub mod login;
