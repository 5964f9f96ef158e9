pub mod aggregate;
pub mod handlers;
pub mod service;
pub mod slug;
