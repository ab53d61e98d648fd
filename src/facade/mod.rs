pub mod student_facade;

pub use student_facade::{search_key, student_key, StudentCache, StudentFacade};
