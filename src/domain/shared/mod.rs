pub mod error_dto;
pub mod response_dto;

pub use error_dto::{ErrorDetail, ErrorDetails, ErrorResponse};
pub use response_dto::DataResponse;
