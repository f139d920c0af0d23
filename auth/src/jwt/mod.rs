pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Claims;
pub use codec::TokenCodec;
pub use codec::DEFAULT_TOKEN_TTL_SECONDS;
pub use errors::TokenError;
pub use errors::TokenRejection;
