pub mod claims;
pub mod codec;
pub mod errors;
pub mod settings;

pub use claims::Claims;
pub use codec::expiration_time;
pub use codec::generate_refresh_token;
pub use codec::is_expired;
pub use codec::IssuedToken;
pub use codec::TokenCodec;
pub use errors::TokenError;
pub use settings::TokenSettings;
