#![allow(unused_imports)]

pub use super::inspection_request::Entity as InspectionRequest;
