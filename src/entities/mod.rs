pub mod inspection_request;
pub mod prelude;
