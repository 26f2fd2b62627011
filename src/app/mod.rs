pub mod chat_use_case;
pub mod payload;
pub mod ports;
