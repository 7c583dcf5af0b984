pub mod credentials;
pub mod test_type;
pub mod token;
pub mod user;

// Re-export the model types so callers can do "use crate::models::*;"
pub use credentials::{Credentials, SignUpDetails};
pub use test_type::{ParseTestTypeError, TestType};
pub use token::TokenPair;
pub use user::UserRecord;
