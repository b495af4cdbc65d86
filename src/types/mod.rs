pub mod category;
pub mod lenient;
pub mod pagination;
pub mod question;
pub mod quiz;
pub mod search;
