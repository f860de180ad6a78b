//! Request context consumed when writing entries.
//!
//! The host application supplies who is acting and where the request came
//! from. "No actor" is a defined state: [`RequestContext::current_actor_id`]
//! returns 0, the same value stored for unassociated entries.

use url::Url;

/// Actor id recorded when nobody is authenticated.
pub const ANONYMOUS_ACTOR: i64 = 0;

/// Provider for the per-request metadata stamped onto every entry.
pub trait RequestContext: Send + Sync {
    /// Authenticated actor, or [`ANONYMOUS_ACTOR`] when there is none.
    fn current_actor_id(&self) -> i64;

    /// Canonical URL of the current request.
    fn current_location_url(&self) -> String;

    /// Referrer header, or an empty string.
    fn current_referrer(&self) -> String;
}

/// Context for an HTTP request handled by the host application.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    home_url: Url,
    request_path: String,
    actor_id: Option<i64>,
    referer: Option<String>,
}

impl RequestInfo {
    /// An unauthenticated request for `request_path` under `home_url`.
    #[must_use]
    pub fn anonymous(home_url: Url, request_path: impl Into<String>) -> Self {
        Self {
            home_url,
            request_path: request_path.into(),
            actor_id: None,
            referer: None,
        }
    }

    #[must_use]
    pub const fn with_actor(mut self, actor_id: i64) -> Self {
        self.actor_id = Some(actor_id);
        self
    }

    #[must_use]
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }
}

impl RequestContext for RequestInfo {
    fn current_actor_id(&self) -> i64 {
        self.actor_id.unwrap_or(ANONYMOUS_ACTOR)
    }

    fn current_location_url(&self) -> String {
        let relative = self.request_path.trim_start_matches('/');
        self.home_url
            .join(relative)
            .unwrap_or_else(|_| self.home_url.clone())
            .to_string()
    }

    fn current_referrer(&self) -> String {
        self.referer.clone().unwrap_or_default()
    }
}

/// Context for work not triggered by a request (CLI, startup, jobs).
#[derive(Debug, Clone)]
pub struct NoRequest {
    home_url: Url,
}

impl NoRequest {
    #[must_use]
    pub const fn new(home_url: Url) -> Self {
        Self { home_url }
    }
}

impl RequestContext for NoRequest {
    fn current_actor_id(&self) -> i64 {
        ANONYMOUS_ACTOR
    }

    fn current_location_url(&self) -> String {
        self.home_url.to_string()
    }

    fn current_referrer(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> Url {
        Url::parse("https://example.com/blog/").unwrap()
    }

    #[test]
    fn test_anonymous_request_has_actor_zero() {
        let ctx = RequestInfo::anonymous(home(), "/post/7");
        assert_eq!(ctx.current_actor_id(), ANONYMOUS_ACTOR);
        assert_eq!(ctx.current_referrer(), "");
    }

    #[test]
    fn test_location_is_joined_under_home() {
        let ctx = RequestInfo::anonymous(home(), "/post/7?preview=true");
        assert_eq!(
            ctx.current_location_url(),
            "https://example.com/blog/post/7?preview=true"
        );

        let root = RequestInfo::anonymous(home(), "");
        assert_eq!(root.current_location_url(), "https://example.com/blog/");
    }

    #[test]
    fn test_authenticated_request() {
        let ctx = RequestInfo::anonymous(home(), "wp-admin")
            .with_actor(42)
            .with_referer("https://search.example/");
        assert_eq!(ctx.current_actor_id(), 42);
        assert_eq!(ctx.current_referrer(), "https://search.example/");
    }

    #[test]
    fn test_no_request_context() {
        let ctx = NoRequest::new(home());
        assert_eq!(ctx.current_actor_id(), 0);
        assert_eq!(ctx.current_location_url(), "https://example.com/blog/");
        assert!(ctx.current_referrer().is_empty());
    }
}
