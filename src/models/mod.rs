pub mod club;
pub mod email;
pub mod outcome;
pub mod request;
pub mod slot;
pub mod window;
