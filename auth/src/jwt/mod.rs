pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use claims::ISSUER;
pub use errors::JwtError;
pub use handler::make_jwt;
pub use handler::validate_jwt;
pub use handler::JwtHandler;
