//! Purpose: Experimental utility endpoints (blacklist, validation, moderation, gender, geolocation).
//! Exports: `EmailValidation` and methods on `BentoClient`.
//! Role: Stateless lookups that do not touch site resources.
//! Invariants: Every argument travels in the query string, including on POST endpoints;
//! none of these calls sends a request body.

use super::client::ApiResult;
use super::{BentoClient, Query};
use serde_json::Value;

/// Arguments for [`BentoClient::validate_email`]. Only `email` is required.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmailValidation {
    pub email: String,
    pub name: Option<String>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

impl EmailValidation {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    fn to_query(&self) -> Query {
        Query::new()
            .with("email", self.email.as_str())
            .with_opt("name", self.name.as_deref())
            .with_opt("user_agent", self.user_agent.as_deref())
            .with_opt("ip", self.ip.as_deref())
    }
}

impl BentoClient {
    pub fn check_blacklist(&self, domain: Option<&str>, ip: Option<&str>) -> ApiResult<Value> {
        let query = Query::new().with_opt("domain", domain).with_opt("ip", ip);
        self.get("/experimental/blacklist.json", query)
    }

    pub fn validate_email(&self, validation: &EmailValidation) -> ApiResult<Value> {
        self.post_query("/experimental/validation", validation.to_query())
    }

    pub fn moderate_content(&self, content: &str) -> ApiResult<Value> {
        self.post_query(
            "/experimental/content_moderation",
            Query::new().with("content", content),
        )
    }

    pub fn guess_gender(&self, name: &str) -> ApiResult<Value> {
        self.post_query("/experimental/gender", Query::new().with("name", name))
    }

    pub fn geolocate_ip(&self, ip: &str) -> ApiResult<Value> {
        self.get("/experimental/geolocation", Query::new().with("ip", ip))
    }
}

#[cfg(test)]
mod tests {
    use super::EmailValidation;

    #[test]
    fn validation_query_keeps_required_email_first() {
        let query = EmailValidation::new("a@b.com")
            .with_name("Ada")
            .with_ip("203.0.113.7")
            .to_query();
        let pairs: Vec<_> = query.iter().collect();
        assert_eq!(
            pairs,
            [("email", "a@b.com"), ("name", "Ada"), ("ip", "203.0.113.7")]
        );
    }

    #[test]
    fn validation_query_omits_empty_optionals() {
        let query = EmailValidation::new("a@b.com").with_user_agent("").to_query();
        assert_eq!(query.len(), 1);
        assert!(query.get("user_agent").is_none());
    }
}
