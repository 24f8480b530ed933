//! Admin route guard
//!
//! Validates the stored admin token against the identity provider on mount,
//! on every path change and on a fixed interval. A failed check purges the
//! token and sends the tab to `/admin-login`, which ends the guard's checks.
//! Validation runs in a spawned task owned by the guard; dropping the guard
//! (unmount) aborts it, including any request in flight. Callers never wait on
//! a check: they read the latest status and show `Checking` as loading.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::application::route_guard::GuardState;
use crate::domain::browser::{Browser, Navigation};
use crate::domain::repository::IdentityVerifier;
use crate::domain::session_store::SessionRepository;

pub const ADMIN_LOGIN_PATH: &str = "/admin-login";

/// Latest result plus how many checks have completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminGuardStatus {
    pub state: GuardState,
    pub completed_checks: u64,
}

pub struct AdminRouteGuard {
    location: String,
    status: watch::Receiver<AdminGuardStatus>,
    paths: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl AdminRouteGuard {
    /// Mount at `path` and start the first check. Must be called inside a Tokio runtime.
    pub fn mount<V>(
        verifier: Arc<V>,
        repo: SessionRepository,
        browser: Arc<dyn Browser>,
        interval: Duration,
        path: impl Into<String>,
    ) -> Self
    where
        V: IdentityVerifier + Send + Sync + 'static,
    {
        let (status_tx, status_rx) = watch::channel(AdminGuardStatus {
            state: GuardState::Checking,
            completed_checks: 0,
        });
        let (paths_tx, paths_rx) = mpsc::unbounded_channel();
        let location = path.into();

        let worker = Worker {
            verifier,
            repo,
            browser,
            location: location.clone(),
            status: status_tx,
        };
        let task = tokio::spawn(worker.run(interval, paths_rx));

        Self {
            location,
            status: status_rx,
            paths: paths_tx,
            task,
        }
    }

    /// Path changed while mounted: re-check and restart the interval.
    /// Showing the same path again is not a change.
    pub fn navigate(&mut self, path: &str) {
        if self.location == path {
            return;
        }
        self.location = path.to_string();
        let _ = self.paths.send(self.location.clone());
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// False once a check came back unauthorized
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn status(&self) -> AdminGuardStatus {
        *self.status.borrow()
    }

    pub fn state(&self) -> GuardState {
        self.status().state
    }

    /// Wait until more than `after` checks have completed
    pub async fn wait_for_check(&mut self, after: u64) -> GuardState {
        let result = self
            .status
            .wait_for(|status| status.completed_checks > after)
            .await
            .map(|status| status.state);
        result.unwrap_or_else(|_| self.state())
    }
}

impl Drop for AdminRouteGuard {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct Worker<V> {
    verifier: Arc<V>,
    repo: SessionRepository,
    browser: Arc<dyn Browser>,
    location: String,
    status: watch::Sender<AdminGuardStatus>,
}

impl<V> Worker<V>
where
    V: IdentityVerifier + Send + Sync + 'static,
{
    async fn run(mut self, period: Duration, mut paths: mpsc::UnboundedReceiver<String>) {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut state = self.check().await;
        // the redirect to the login view unmounts the guard
        while state != GuardState::Unauthorized {
            state = tokio::select! {
                _ = ticker.tick() => self.check().await,
                path = paths.recv() => match path {
                    Some(path) => {
                        self.location = path;
                        ticker.reset();
                        self.check().await
                    }
                    None => break,
                },
            };
        }
    }

    async fn check(&mut self) -> GuardState {
        let state = match self.repo.admin_token() {
            None => GuardState::Unauthorized,
            Some(token) => match self.verifier.verify(&token).await {
                Ok(()) => GuardState::Authorized,
                Err(e) => {
                    tracing::warn!(error = %e, path = %self.location, "Admin token rejected");
                    self.repo.purge_admin();
                    GuardState::Unauthorized
                }
            },
        };

        if state == GuardState::Unauthorized {
            self.browser.navigate(
                Navigation::replace(ADMIN_LOGIN_PATH).from_location(self.location.clone()),
            );
        }

        self.status.send_modify(|status| {
            status.state = state;
            status.completed_checks += 1;
        });
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::AdminProfile;
    use crate::domain::session_store::{ADMIN_JWT_KEY, ADMIN_USER_KEY};
    use crate::infra::memory_store::MemorySessionStore;
    use crate::infra::recording_browser::RecordingBrowser;
    use platform::http_client::UpstreamError;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Accepts `valid` while `up` is set; counts calls
    struct FakeVerifier {
        up: AtomicBool,
        calls: AtomicUsize,
        delay: Duration,
    }

    impl FakeVerifier {
        fn new(up: bool) -> Arc<Self> {
            Arc::new(Self {
                up: AtomicBool::new(up),
                calls: AtomicUsize::new(0),
                delay: Duration::ZERO,
            })
        }

        fn slow(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                up: AtomicBool::new(true),
                calls: AtomicUsize::new(0),
                delay,
            })
        }
    }

    impl IdentityVerifier for FakeVerifier {
        async fn verify(&self, token: &str) -> Result<(), UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.up.load(Ordering::SeqCst) && token == "valid" {
                Ok(())
            } else {
                Err(UpstreamError::Status(401))
            }
        }
    }

    const FIVE_MINUTES: Duration = Duration::from_secs(300);

    fn repo_with_token(token: Option<&str>) -> SessionRepository {
        let repo = SessionRepository::new(Arc::new(MemorySessionStore::new()));
        if let Some(token) = token {
            repo.save_admin(token, &AdminProfile::from_upstream(&serde_json::json!({ "id": 1 })));
        }
        repo
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_token_is_unauthorized_without_network() {
        let verifier = FakeVerifier::new(true);
        let browser = Arc::new(RecordingBrowser::new("/admin-dashboard"));
        let mut guard = AdminRouteGuard::mount(
            verifier.clone(),
            repo_with_token(None),
            browser.clone(),
            FIVE_MINUTES,
            "/admin-dashboard",
        );
        assert_eq!(guard.state(), GuardState::Checking);

        assert_eq!(guard.wait_for_check(0).await, GuardState::Unauthorized);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            browser.drain().navigations,
            vec![Navigation::replace("/admin-login").from_location("/admin-dashboard")]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_token_authorizes() {
        let verifier = FakeVerifier::new(true);
        let browser = Arc::new(RecordingBrowser::new("/AdUplink"));
        let mut guard = AdminRouteGuard::mount(
            verifier,
            repo_with_token(Some("valid")),
            browser.clone(),
            FIVE_MINUTES,
            "/AdUplink",
        );

        assert_eq!(guard.wait_for_check(0).await, GuardState::Authorized);
        assert!(browser.drain().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_verification_purges_and_redirects() {
        let verifier = FakeVerifier::new(true);
        let repo = repo_with_token(Some("expired"));
        let browser = Arc::new(RecordingBrowser::new("/admin-uplode"));
        let mut guard = AdminRouteGuard::mount(
            verifier,
            repo.clone(),
            browser.clone(),
            FIVE_MINUTES,
            "/admin-uplode",
        );

        assert_eq!(guard.wait_for_check(0).await, GuardState::Unauthorized);
        assert!(repo.raw(ADMIN_JWT_KEY).is_none());
        assert!(repo.raw(ADMIN_USER_KEY).is_none());
        assert_eq!(browser.current_path(), "/admin-login");
    }

    #[tokio::test(start_paused = true)]
    async fn test_revalidates_every_interval() {
        let verifier = FakeVerifier::new(true);
        let repo = repo_with_token(Some("valid"));
        let browser = Arc::new(RecordingBrowser::new("/admin-dashboard"));
        let mut guard = AdminRouteGuard::mount(
            verifier.clone(),
            repo.clone(),
            browser,
            FIVE_MINUTES,
            "/admin-dashboard",
        );
        assert_eq!(guard.wait_for_check(0).await, GuardState::Authorized);

        tokio::time::sleep(FIVE_MINUTES - Duration::from_secs(1)).await;
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);

        verifier.up.store(false, Ordering::SeqCst);
        assert_eq!(guard.wait_for_check(1).await, GuardState::Unauthorized);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 2);
        assert!(repo.raw(ADMIN_JWT_KEY).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_rechecks() {
        let verifier = FakeVerifier::new(true);
        let browser = Arc::new(RecordingBrowser::new("/admin-dashboard"));
        let mut guard = AdminRouteGuard::mount(
            verifier.clone(),
            repo_with_token(Some("valid")),
            browser,
            FIVE_MINUTES,
            "/admin-dashboard",
        );
        guard.wait_for_check(0).await;

        guard.navigate("/Linkuplode");
        assert_eq!(guard.wait_for_check(1).await, GuardState::Authorized);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 2);
        assert_eq!(guard.location(), "/Linkuplode");

        // same path again does not re-check
        guard.navigate("/Linkuplode");
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_checks_stop_after_unauthorized() {
        let verifier = FakeVerifier::new(true);
        let browser = Arc::new(RecordingBrowser::new("/admin-dashboard"));
        let mut guard = AdminRouteGuard::mount(
            verifier.clone(),
            repo_with_token(Some("valid")),
            browser.clone(),
            FIVE_MINUTES,
            "/admin-dashboard",
        );
        assert_eq!(guard.wait_for_check(0).await, GuardState::Authorized);

        verifier.up.store(false, Ordering::SeqCst);
        assert_eq!(guard.wait_for_check(1).await, GuardState::Unauthorized);

        tokio::time::sleep(FIVE_MINUTES * 3).await;
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 2);
        assert_eq!(browser.drain().navigations.len(), 1);
        assert!(!guard.is_active());
        assert_eq!(guard.state(), GuardState::Unauthorized);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_readable_while_check_in_flight() {
        let verifier = FakeVerifier::slow(Duration::from_secs(10));
        let browser = Arc::new(RecordingBrowser::new("/admin-dashboard"));
        let mut guard = AdminRouteGuard::mount(
            verifier,
            repo_with_token(Some("valid")),
            browser,
            FIVE_MINUTES,
            "/admin-dashboard",
        );

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(guard.state(), GuardState::Checking);
        assert!(guard.is_active());

        assert_eq!(guard.wait_for_check(0).await, GuardState::Authorized);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_cancels_interval_and_in_flight_check() {
        let verifier = FakeVerifier::slow(Duration::from_secs(10));
        let repo = repo_with_token(Some("valid"));
        let browser = Arc::new(RecordingBrowser::new("/admin-dashboard"));
        let guard = AdminRouteGuard::mount(
            verifier.clone(),
            repo.clone(),
            browser.clone(),
            FIVE_MINUTES,
            "/admin-dashboard",
        );
        let mut status = guard.status.clone();

        // let the first verification start, then unmount mid-request
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);
        drop(guard);

        tokio::time::sleep(FIVE_MINUTES * 3).await;
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);
        assert_eq!(status.borrow_and_update().completed_checks, 0);
        assert!(repo.raw(ADMIN_JWT_KEY).is_some());
        assert!(browser.drain().is_empty());
    }
}
