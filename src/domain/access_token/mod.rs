pub mod dto;
pub mod error;
pub mod service;
pub mod validation;

pub use dto::{
    AccessTokenRequest, AccessTokenResponse, InvalidTokenFormat, PresetTokenBody,
    TokenPermissions, TokenPreset, TokenValidation, UpstreamAccessToken, ValidateTokenRequest,
};
pub use error::AccessTokenServiceError;
pub use service::{AccessTokenService, AccessTokenServiceApi, TokenCheck};
