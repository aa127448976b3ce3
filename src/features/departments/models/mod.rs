mod department;

pub use department::DepartmentRecord;
