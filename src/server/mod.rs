pub mod app;
mod deserializers;
pub mod pagination;
mod routes;
