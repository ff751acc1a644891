//! Data models for LocalLibrary

pub mod book;
pub mod book_instance;
pub mod book_instance_form;

// Re-export commonly used types
pub use book::Book;
pub use book_instance::{
    BookInstance, BookInstanceDetail, BookInstanceFormValues, BookInstanceStatus, NewBookInstance,
};
pub use book_instance_form::{
    BookInstanceForm, DeleteBookInstanceForm, FieldError, ValidationReport,
};
