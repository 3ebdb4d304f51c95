//! Listing visibility rules.
//!
//! Public callers see active records only, and events only while their
//! window is open. Admins see everything. Stores either evaluate
//! [`ContentQuery::matches`] directly or translate the same rule into their
//! query language.

use chrono::{DateTime, Utc};

use crate::models::{Content, ContentType};

/// Who is asking for the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Public,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentQuery {
    pub content_type: Option<ContentType>,
    pub audience: Audience,
    pub now: DateTime<Utc>,
}

impl ContentQuery {
    pub fn new(content_type: Option<ContentType>, audience: Audience, now: DateTime<Utc>) -> Self {
        ContentQuery {
            content_type,
            audience,
            now,
        }
    }

    pub fn public(content_type: Option<ContentType>, now: DateTime<Utc>) -> Self {
        Self::new(content_type, Audience::Public, now)
    }

    pub fn admin(content_type: Option<ContentType>, now: DateTime<Utc>) -> Self {
        Self::new(content_type, Audience::Admin, now)
    }

    pub fn matches(&self, content: &Content) -> bool {
        if let Some(wanted) = self.content_type {
            if content.content_type != wanted {
                return false;
            }
        }

        match self.audience {
            Audience::Admin => true,
            Audience::Public => {
                content.is_active
                    && (!content.content_type.has_date_range() || content.is_running_at(self.now))
            }
        }
    }
}

/// Listing order: most recently created first.
pub fn sort_newest_first(items: &mut [Content]) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewContent;
    use chrono::{Duration, TimeZone};

    fn record(
        content_type: ContentType,
        is_active: bool,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Content {
        NewContent {
            content_type,
            title: "t".into(),
            description: "d".into(),
            media: vec![],
            start_date: window.map(|w| w.0),
            end_date: window.map(|w| w.1),
            is_active,
        }
        .into_content(Utc::now())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 3, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_public_hides_inactive() {
        let q = ContentQuery::public(None, now());
        assert!(!q.matches(&record(ContentType::Work, false, None)));
        assert!(q.matches(&record(ContentType::Work, true, None)));
        assert!(q.matches(&record(ContentType::Achievement, true, None)));
    }

    #[test]
    fn test_public_hides_events_outside_window() {
        let q = ContentQuery::public(Some(ContentType::Event), now());
        let running = (now() - Duration::days(2), now() + Duration::days(2));
        let expired = (now() - Duration::days(5), now() - Duration::days(1));
        let future = (now() + Duration::days(1), now() + Duration::days(5));

        assert!(q.matches(&record(ContentType::Event, true, Some(running))));
        assert!(!q.matches(&record(ContentType::Event, true, Some(expired))));
        assert!(!q.matches(&record(ContentType::Event, true, Some(future))));
    }

    #[test]
    fn test_admin_sees_everything_of_type() {
        let q = ContentQuery::admin(Some(ContentType::Event), now());
        let expired = (now() - Duration::days(5), now() - Duration::days(1));
        assert!(q.matches(&record(ContentType::Event, false, Some(expired))));
        assert!(!q.matches(&record(ContentType::Work, true, None)));
    }

    #[test]
    fn test_type_filter_applies_to_public() {
        let q = ContentQuery::public(Some(ContentType::Work), now());
        assert!(!q.matches(&record(ContentType::Achievement, true, None)));
    }

    #[test]
    fn test_sort_newest_first() {
        let mut a = record(ContentType::Work, true, None);
        let mut b = record(ContentType::Work, true, None);
        a.created_at = now() - Duration::hours(1);
        b.created_at = now();
        let mut items = vec![a.clone(), b.clone()];
        sort_newest_first(&mut items);
        assert_eq!(items[0].id, b.id);
        assert_eq!(items[1].id, a.id);
    }
}
