//! Latest-request tokens.
//!
//! Each fetch takes a token before it awaits the backend. When the response
//! arrives it is applied only if no newer token has been issued since.

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct RequestToken(u64);

/// Issues monotonically increasing [`RequestToken`]s.
#[derive(Debug, Default)]
pub(crate) struct TokenCounter {
    latest: u64,
}

impl TokenCounter {
    /// Issues a token that supersedes every earlier one.
    pub(crate) fn issue(&mut self) -> RequestToken {
        self.latest = self.latest.wrapping_add(1);
        RequestToken(self.latest)
    }

    /// Returns `true` if `token` is the most recently issued token.
    pub(crate) const fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}
