mod documents;
mod student;

pub use documents::StudentDocuments;
pub use student::{StudentCategory, StudentRecord};
