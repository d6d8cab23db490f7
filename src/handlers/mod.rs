pub mod reserve;
