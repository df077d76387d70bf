//! Outgoing response metadata written by auth operations.

use crate::result::AppResult;

/// Write access to the headers of the response being built.
///
/// The auth core only ever writes the session credential through this;
/// the transport decides how a named credential is encoded (for HTTP, a
/// `Set-Cookie` header).
pub trait ResponseMetadata: Send {
    /// Set `name` to `value` on the outgoing response.
    fn set_header(&mut self, name: &str, value: &str) -> AppResult<()>;
}
