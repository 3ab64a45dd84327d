pub mod chat;
pub mod record;
