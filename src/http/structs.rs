pub mod buffer_pool;
pub mod http_service_data;
