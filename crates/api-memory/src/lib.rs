mod api;

pub use api::MemoryJobApi;
