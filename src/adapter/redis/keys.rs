/// Default namespace of personalised sorted-set feeds.
pub const DEFAULT_NAMESPACE: &str = "userPersonalizedFeed";
/// Default key of the shared anonymous feed.
pub const DEFAULT_ANONYMOUS_KEY: &str = "anonComprehensiveFeed:sorted";

/// Naming scheme of the sorted sets backing each feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedKeys {
    pub namespace: String,
    pub anonymous_key: String,
}

impl FeedKeys {
    /// `<namespace>:sorted:<user_id>`, or the anonymous key when no user is given.
    #[must_use]
    pub fn key_for(&self, user_id: Option<&str>) -> String {
        match user_id {
            Some(user_id) => format!("{}:sorted:{user_id}", self.namespace),
            None => self.anonymous_key.clone(),
        }
    }
}

impl Default for FeedKeys {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            anonymous_key: DEFAULT_ANONYMOUS_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personalised_key() {
        assert_eq!(
            FeedKeys::default().key_for(Some("user-42")),
            "userPersonalizedFeed:sorted:user-42"
        );
    }

    #[test]
    fn test_anonymous_key() {
        assert_eq!(
            FeedKeys::default().key_for(None),
            "anonComprehensiveFeed:sorted"
        );
    }

    #[test]
    fn test_custom_namespace() {
        let keys = FeedKeys {
            namespace: "staging".into(),
            anonymous_key: "staging:anon".into(),
        };
        assert_eq!(keys.key_for(Some("u1")), "staging:sorted:u1");
        assert_eq!(keys.key_for(None), "staging:anon");
    }
}
