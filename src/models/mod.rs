pub mod book;
pub mod book_detail;
pub mod publisher;

pub use book::Book;
pub use book_detail::BookDetail;
pub use publisher::Publisher;
