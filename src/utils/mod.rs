pub mod slug;
pub mod threads;
