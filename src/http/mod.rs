pub mod http;
pub mod impls;
pub mod structs;
