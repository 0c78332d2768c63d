/*
[INPUT]:  Credentials and canonical message strings
[OUTPUT]: Signed authentication headers for feed subscriptions
[POS]:    Auth layer - credential signing boundary
[UPDATE]: When changing signing algorithm or header format
*/

pub mod signer;

pub use signer::{ApiCredentials, AuthHeaders, CredentialSigner, HmacSigner};
