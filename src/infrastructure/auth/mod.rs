pub mod middleware;
pub mod request_id;

pub use middleware::{
    cartesia_auth_middleware, extract_bearer_token, validate_api_version, CartesiaCredentials,
};
pub use request_id::request_id_middleware;
