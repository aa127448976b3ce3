mod course;

pub use course::CourseRecord;
