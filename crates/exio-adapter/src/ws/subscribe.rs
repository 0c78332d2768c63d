/*
[INPUT]:  Symbol/channel configuration and optional credentials
[OUTPUT]: A complete subscribe frame ready to send on connect
[POS]:    WebSocket layer - subscription request construction
[UPDATE]: When the subscribe frame format or signing scheme changes
*/

use crate::auth::{ApiCredentials, CredentialSigner};
use crate::http::Result;
use crate::types::{Channel, DEFAULT_CHANNEL, SubscribeRequest, Symbols, resolve_symbols};
use chrono::Utc;

/// Method component of the canonical signing message
const SIGN_METHOD: &str = "GET";

/// Path component of the canonical signing message
const SIGN_PATH: &str = "/user/self/verify";

/// Build the initial subscribe request.
///
/// Symbols default to a single built-in pair and a bare symbol is wrapped
/// into a one-element list. Without an explicit channel list a single
/// `books` channel over the resolved symbols is used; an explicit list is
/// taken verbatim. Credentials with a non-empty key are signed over
/// `timestamp + "GET" + "/user/self/verify"` and the resulting headers are
/// merged into the top level of the frame. Pure construction; nothing here
/// touches the network.
pub fn build_subscribe_request(
    symbols: Option<Symbols>,
    channels: Option<Vec<Channel>>,
    credentials: Option<&ApiCredentials>,
    signer: &dyn CredentialSigner,
) -> Result<SubscribeRequest> {
    let channels = match channels {
        Some(channels) => channels,
        None => vec![Channel::new(DEFAULT_CHANNEL, resolve_symbols(symbols))],
    };

    let mut request = SubscribeRequest::subscribe(channels);

    if let Some(credentials) = credentials
        && !credentials.key.is_empty()
    {
        let timestamp = Utc::now().timestamp().to_string();
        let message = format!("{timestamp}{SIGN_METHOD}{SIGN_PATH}");
        let headers = signer.sign(&timestamp, &message, credentials)?;
        request = request.with_auth(headers);
    }

    Ok(request)
}
