//! Fetch User Data Use Case
//!
//! Dashboard data for the signed-in audience, classified by the domain policy.

use std::sync::Arc;

use auth::domain::domain_policy::DomainPolicy;
use auth::domain::user_type::UserType;
use platform::clock::Clock;

use crate::application::config::ContentConfig;
use crate::domain::collection::{CollectionName, known};
use crate::domain::records::{StaffData, StudentData, UserData};
use crate::domain::repository::ContentSource;
use crate::error::{ContentError, ContentResult};

pub struct FetchUserDataUseCase<S>
where
    S: ContentSource,
{
    source: Arc<S>,
    policy: Arc<DomainPolicy>,
    clock: Arc<dyn Clock>,
    config: Arc<ContentConfig>,
}

impl<S> FetchUserDataUseCase<S>
where
    S: ContentSource,
{
    pub fn new(
        source: Arc<S>,
        policy: Arc<DomainPolicy>,
        clock: Arc<dyn Clock>,
        config: Arc<ContentConfig>,
    ) -> Self {
        Self {
            source,
            policy,
            clock,
            config,
        }
    }

    pub async fn execute(&self, email: &str) -> ContentResult<UserData> {
        match self.policy.user_type(email) {
            UserType::Student => Ok(UserData::Student(self.student(email).await)),
            UserType::Staff => Ok(UserData::Staff(StaffData {
                email: email.to_string(),
                last_fetched: self.clock.now(),
            })),
            UserType::Admin | UserType::Unknown => Err(ContentError::InvalidEmailDomain),
        }
    }

    /// Posts and codings, newest first. If either list fails both are empty.
    async fn student(&self, email: &str) -> StudentData {
        let posts = CollectionName::known(known::POSTS);
        let codings = CollectionName::known(known::CODINGS);
        let newest_first = [("sort".to_string(), "publishedAt:desc".to_string())];

        let (posts, codings) = match tokio::try_join!(
            self.source.list(&posts, &newest_first),
            self.source.list(&codings, &newest_first),
        ) {
            Ok(lists) => lists,
            Err(e) => {
                tracing::warn!(error = %e, "Student posts and codings unavailable");
                (Vec::new(), Vec::new())
            }
        };

        StudentData::new(
            email,
            posts,
            codings,
            self.config.recent_limit,
            self.clock.now(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::FakeCms;
    use chrono::DateTime;
    use platform::clock::ManualClock;
    use serde_json::json;

    fn use_case(cms: FakeCms) -> FetchUserDataUseCase<FakeCms> {
        FetchUserDataUseCase::new(
            Arc::new(cms),
            Arc::new(DomainPolicy::default()),
            Arc::new(ManualClock::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap())),
            Arc::new(ContentConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_student_data() {
        let posts = (0..7).map(|i| json!({ "id": i })).collect();
        let cms = FakeCms::default()
            .with(known::POSTS, posts)
            .with(known::CODINGS, vec![json!({ "id": "c" })]);
        let calls = cms.clone();

        let data = use_case(cms).execute("s@lamduan.mfu.ac.th").await.unwrap();
        let UserData::Student(student) = data else {
            panic!("expected student data");
        };
        assert_eq!(student.total_posts, 7);
        assert_eq!(student.recent_posts.len(), 5);
        assert_eq!(student.total_codings, 1);
        assert_eq!(student.last_fetched.timestamp(), 1_700_000_000);

        for (_, params) in calls.calls() {
            assert_eq!(params, vec![("sort".to_string(), "publishedAt:desc".to_string())]);
        }
    }

    #[tokio::test]
    async fn test_student_lists_fail_together() {
        let cms = FakeCms::default()
            .with(known::POSTS, vec![json!({ "id": 1 })])
            .failing(known::CODINGS);

        let UserData::Student(student) = use_case(cms).execute("s@lamduan.mfu.ac.th").await.unwrap()
        else {
            panic!("expected student data");
        };
        assert!(student.posts.is_empty());
        assert!(student.codings.is_empty());
        assert_eq!(student.total_posts, 0);
    }

    #[tokio::test]
    async fn test_staff_data_needs_no_network() {
        let cms = FakeCms::default();
        let calls = cms.clone();

        let data = use_case(cms).execute("t@mfu.ac.th").await.unwrap();
        assert!(matches!(data, UserData::Staff(ref staff) if staff.email == "t@mfu.ac.th"));
        assert!(calls.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_domain() {
        let err = use_case(FakeCms::default())
            .execute("x@gmail.com")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid email domain");
    }
}
