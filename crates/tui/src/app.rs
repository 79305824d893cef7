use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use api::{ApiClient, ApiError, FeedItem, FeedSource, Locale, RssItem, TrendingItem};
use dashboard::{request_summary, FetchDecision, Panel, SessionGate, SummaryKind, SummaryViewer};

/// Identifies one dashboard panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelId {
    InfoQ,
    GithubTrending,
    GolangTrending,
    GoogleCloud,
    Aws,
    Azure,
    GolangWeekly,
}

impl PanelId {
    pub const ALL: [PanelId; 7] = [
        PanelId::InfoQ,
        PanelId::GithubTrending,
        PanelId::GolangTrending,
        PanelId::GoogleCloud,
        PanelId::Aws,
        PanelId::Azure,
        PanelId::GolangWeekly,
    ];

    /// Which summary endpoint this panel's rows target, if any.
    pub fn summary_kind(self) -> Option<SummaryKind> {
        match self {
            PanelId::InfoQ => Some(SummaryKind::Article),
            PanelId::GithubTrending | PanelId::GolangTrending => Some(SummaryKind::Repository),
            _ => None,
        }
    }
}

/// Typed payload of a finished panel fetch.
pub enum PanelPayload {
    Trending(Vec<TrendingItem>),
    Rss(Vec<RssItem>),
    Feed(Vec<FeedItem>),
}

/// Results coming back from spawned fetch tasks over the app channel.
pub enum AppMsg {
    SessionChecked(Result<bool, ApiError>),
    LoginFinished(Result<(), ApiError>),
    PanelFetched {
        id: PanelId,
        /// Locale the fetch was issued under; a result for a stale locale
        /// only fills the panel cache.
        locale: Locale,
        result: Result<PanelPayload, ApiError>,
    },
    SummaryFetched {
        id: PanelId,
        text: String,
    },
}

/// Login screen input state.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub editing_password: bool,
    pub submitting: bool,
}

impl LoginForm {
    pub fn active_field_mut(&mut self) -> &mut String {
        if self.editing_password {
            &mut self.password
        } else {
            &mut self.username
        }
    }
}

/// Owns all application state. Fetches run as tokio tasks and report back
/// through [`AppMsg`]; the event loop feeds those into [`App::apply`].
pub struct App {
    api: Arc<ApiClient>,
    runtime: Handle,
    tx: UnboundedSender<AppMsg>,

    pub quit: bool,
    pub locale: Locale,
    pub session: SessionGate,
    pub login: LoginForm,

    pub infoq: Panel<RssItem>,
    pub github: Panel<TrendingItem>,
    pub golang: Panel<TrendingItem>,
    pub google_cloud: Panel<FeedItem>,
    pub aws: Panel<FeedItem>,
    pub azure: Panel<FeedItem>,
    pub golang_weekly: Panel<FeedItem>,

    pub focus: PanelId,
    pub selected: usize,

    infoq_summary: SummaryViewer,
    github_summary: SummaryViewer,
    golang_summary: SummaryViewer,
    /// Which panel's summary modal is currently shown.
    pub modal: Option<PanelId>,
}

impl App {
    pub fn new(
        api: Arc<ApiClient>,
        runtime: Handle,
        tx: UnboundedSender<AppMsg>,
        locale: Locale,
    ) -> Self {
        Self {
            api,
            runtime,
            tx,
            quit: false,
            locale,
            session: SessionGate::new(),
            login: LoginForm::default(),
            infoq: Panel::new("InfoQ latest news", "RSSフィードの取得に失敗しました。", true),
            github: Panel::new(
                "GitHub daily trends",
                "GitHubトレンドデータの取得に失敗しました。",
                false,
            ),
            golang: Panel::new(
                "Golang repository daily trends",
                "Golangリポジトリトレンドデータの取得に失敗しました。",
                false,
            ),
            google_cloud: Panel::new(
                "Google Cloud GCP RSS Feed",
                "フィードの取得に失敗しました。",
                true,
            ),
            aws: Panel::new("AWS RSS Feed", "フィードの取得に失敗しました。", true),
            azure: Panel::new("Azure RSS Feed", "フィードの取得に失敗しました。", true),
            golang_weekly: Panel::new("GolangWeekly", "フィードの取得に失敗しました。", false),
            focus: PanelId::InfoQ,
            selected: 0,
            infoq_summary: SummaryViewer::new(),
            github_summary: SummaryViewer::new(),
            golang_summary: SummaryViewer::new(),
            modal: None,
        }
    }

    /// Kick off the single startup session check.
    pub fn start(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = api.check_auth().await;
            let _ = tx.send(AppMsg::SessionChecked(result));
        });
    }

    pub fn viewer(&self, id: PanelId) -> Option<&SummaryViewer> {
        match id {
            PanelId::InfoQ => Some(&self.infoq_summary),
            PanelId::GithubTrending => Some(&self.github_summary),
            PanelId::GolangTrending => Some(&self.golang_summary),
            _ => None,
        }
    }

    fn viewer_mut(&mut self, id: PanelId) -> Option<&mut SummaryViewer> {
        match id {
            PanelId::InfoQ => Some(&mut self.infoq_summary),
            PanelId::GithubTrending => Some(&mut self.github_summary),
            PanelId::GolangTrending => Some(&mut self.golang_summary),
            _ => None,
        }
    }

    pub fn panel_name(&self, id: PanelId) -> &'static str {
        match id {
            PanelId::InfoQ => self.infoq.name(),
            PanelId::GithubTrending => self.github.name(),
            PanelId::GolangTrending => self.golang.name(),
            PanelId::GoogleCloud => self.google_cloud.name(),
            PanelId::Aws => self.aws.name(),
            PanelId::Azure => self.azure.name(),
            PanelId::GolangWeekly => self.golang_weekly.name(),
        }
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            PanelId::InfoQ => self.infoq.data().items().map_or(0, |i| i.len()),
            PanelId::GithubTrending => self.github.data().items().map_or(0, |i| i.len()),
            PanelId::GolangTrending => self.golang.data().items().map_or(0, |i| i.len()),
            PanelId::GoogleCloud => self.google_cloud.data().items().map_or(0, |i| i.len()),
            PanelId::Aws => self.aws.data().items().map_or(0, |i| i.len()),
            PanelId::Azure => self.azure.data().items().map_or(0, |i| i.len()),
            PanelId::GolangWeekly => self.golang_weekly.data().items().map_or(0, |i| i.len()),
        }
    }

    // -- fetching ------------------------------------------------------------

    /// Put every panel in the loading state and fetch them all in parallel.
    pub fn fetch_all(&mut self) {
        self.infoq.start_loading();
        self.github.start_loading();
        self.golang.start_loading();
        self.google_cloud.start_loading();
        self.aws.start_loading();
        self.azure.start_loading();
        self.golang_weekly.start_loading();
        for id in PanelId::ALL {
            self.spawn_fetch(id);
        }
    }

    fn spawn_fetch(&self, id: PanelId) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let locale = self.locale;
        self.runtime.spawn(async move {
            let result = match id {
                PanelId::InfoQ => api
                    .infoq_feed(locale)
                    .await
                    .map(|feed| PanelPayload::Rss(feed.items)),
                PanelId::GithubTrending => {
                    api.github_trending().await.map(PanelPayload::Trending)
                }
                PanelId::GolangTrending => api
                    .golang_repository_trending()
                    .await
                    .map(PanelPayload::Trending),
                PanelId::GoogleCloud => api
                    .feed(FeedSource::GoogleCloud, locale)
                    .await
                    .map(PanelPayload::Feed),
                PanelId::Aws => api.feed(FeedSource::Aws, locale).await.map(PanelPayload::Feed),
                PanelId::Azure => api
                    .feed(FeedSource::Azure, locale)
                    .await
                    .map(PanelPayload::Feed),
                PanelId::GolangWeekly => api
                    .feed(FeedSource::GolangWeekly, locale)
                    .await
                    .map(PanelPayload::Feed),
            };
            let _ = tx.send(AppMsg::PanelFetched { id, locale, result });
        });
    }

    // -- message application -------------------------------------------------

    pub fn apply(&mut self, msg: AppMsg) {
        match msg {
            AppMsg::SessionChecked(outcome) => {
                self.session.resolve_check(outcome);
                if self.session.is_authenticated() {
                    self.fetch_all();
                }
            }
            AppMsg::LoginFinished(outcome) => {
                self.login.submitting = false;
                let was_authenticated = self.session.is_authenticated();
                self.session.resolve_login(outcome);
                if self.session.is_authenticated() && !was_authenticated {
                    self.login.password.clear();
                    self.fetch_all();
                }
            }
            AppMsg::PanelFetched { id, locale, result } => {
                self.apply_panel_fetch(id, locale, result);
                if self.focus == id {
                    self.clamp_selection();
                }
            }
            AppMsg::SummaryFetched { id, text } => {
                if let Some(viewer) = self.viewer_mut(id) {
                    // A resolution arriving after the modal was closed is
                    // dropped; reopening starts a fresh request.
                    if viewer.is_requesting() {
                        viewer.resolve(text);
                    }
                }
            }
        }
    }

    fn apply_panel_fetch(
        &mut self,
        id: PanelId,
        locale: Locale,
        result: Result<PanelPayload, ApiError>,
    ) {
        let current = self.locale;
        if let Err(e) = &result {
            tracing::warn!("fetch for {} failed: {}", self.panel_name(id), e);
        }
        match (id, result) {
            (PanelId::InfoQ, Ok(PanelPayload::Rss(items))) => {
                self.infoq.resolve(locale, current, items)
            }
            (PanelId::InfoQ, Err(_)) => self.infoq.fail(locale, current),
            (PanelId::GithubTrending, Ok(PanelPayload::Trending(items))) => {
                self.github.resolve(locale, current, items)
            }
            (PanelId::GithubTrending, Err(_)) => self.github.fail(locale, current),
            (PanelId::GolangTrending, Ok(PanelPayload::Trending(items))) => {
                self.golang.resolve(locale, current, items)
            }
            (PanelId::GolangTrending, Err(_)) => self.golang.fail(locale, current),
            (PanelId::GoogleCloud, Ok(PanelPayload::Feed(items))) => {
                self.google_cloud.resolve(locale, current, items)
            }
            (PanelId::GoogleCloud, Err(_)) => self.google_cloud.fail(locale, current),
            (PanelId::Aws, Ok(PanelPayload::Feed(items))) => {
                self.aws.resolve(locale, current, items)
            }
            (PanelId::Aws, Err(_)) => self.aws.fail(locale, current),
            (PanelId::Azure, Ok(PanelPayload::Feed(items))) => {
                self.azure.resolve(locale, current, items)
            }
            (PanelId::Azure, Err(_)) => self.azure.fail(locale, current),
            (PanelId::GolangWeekly, Ok(PanelPayload::Feed(items))) => {
                self.golang_weekly.resolve(locale, current, items)
            }
            (PanelId::GolangWeekly, Err(_)) => self.golang_weekly.fail(locale, current),
            // Payload shape never mismatches its panel; ignore if it would.
            _ => {}
        }
    }

    // -- session -------------------------------------------------------------

    pub fn submit_login(&mut self) {
        if self.login.submitting {
            return;
        }
        self.login.submitting = true;
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let username = self.login.username.clone();
        let password = self.login.password.clone();
        self.runtime.spawn(async move {
            let result = api.login(&username, &password).await;
            let _ = tx.send(AppMsg::LoginFinished(result));
        });
    }

    /// Local logout first, best-effort server revoke after.
    pub fn logout(&mut self) {
        self.session.logout();
        self.close_modal();
        let api = Arc::clone(&self.api);
        self.runtime.spawn(async move {
            if let Err(e) = api.logout().await {
                tracing::warn!("logout request failed: {}", e);
            }
        });
    }

    // -- locale --------------------------------------------------------------

    pub fn toggle_locale(&mut self) {
        self.set_locale(self.locale.toggled());
    }

    pub fn set_locale(&mut self, locale: Locale) {
        if locale == self.locale {
            return;
        }
        self.locale = locale;
        if !self.session.is_authenticated() {
            return;
        }
        let decisions = [
            (PanelId::InfoQ, self.infoq.on_locale_change(locale)),
            (PanelId::GithubTrending, self.github.on_locale_change(locale)),
            (PanelId::GolangTrending, self.golang.on_locale_change(locale)),
            (
                PanelId::GoogleCloud,
                self.google_cloud.on_locale_change(locale),
            ),
            (PanelId::Aws, self.aws.on_locale_change(locale)),
            (PanelId::Azure, self.azure.on_locale_change(locale)),
            (
                PanelId::GolangWeekly,
                self.golang_weekly.on_locale_change(locale),
            ),
        ];
        for (id, decision) in decisions {
            if decision == FetchDecision::Refetch {
                self.spawn_fetch(id);
            }
        }
        self.clamp_selection();
    }

    // -- summaries -----------------------------------------------------------

    /// Generate an AI summary for the selected row of the focused panel.
    /// No-op on panels without a summary control, and refused while a
    /// request for this panel is already in flight.
    pub fn generate_summary(&mut self) {
        let id = self.focus;
        let Some(kind) = id.summary_kind() else {
            return;
        };
        let Some(url) = self.selected_url() else {
            return;
        };
        {
            let Some(viewer) = self.viewer_mut(id) else {
                return;
            };
            if !viewer.begin() {
                return;
            }
        }
        self.modal = Some(id);

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let locale = self.locale;
        self.runtime.spawn(async move {
            let text = request_summary(api.as_ref(), kind, &url, locale).await;
            let _ = tx.send(AppMsg::SummaryFetched { id, text });
        });
    }

    pub fn close_modal(&mut self) {
        if let Some(id) = self.modal.take() {
            if let Some(viewer) = self.viewer_mut(id) {
                viewer.close();
            }
        }
    }

    fn selected_url(&self) -> Option<String> {
        match self.focus {
            PanelId::InfoQ => self
                .infoq
                .data()
                .items()?
                .get(self.selected)
                .map(|item| item.link.clone()),
            PanelId::GithubTrending => self
                .github
                .data()
                .items()?
                .get(self.selected)
                .map(|item| item.url.clone()),
            PanelId::GolangTrending => self
                .golang
                .data()
                .items()?
                .get(self.selected)
                .map(|item| item.url.clone()),
            _ => None,
        }
    }

    // -- navigation ----------------------------------------------------------

    pub fn next_panel(&mut self) {
        let i = PanelId::ALL.iter().position(|p| *p == self.focus).unwrap_or(0);
        self.focus = PanelId::ALL[(i + 1) % PanelId::ALL.len()];
        self.selected = 0;
    }

    pub fn prev_panel(&mut self) {
        let i = PanelId::ALL.iter().position(|p| *p == self.focus).unwrap_or(0);
        self.focus = PanelId::ALL[(i + PanelId::ALL.len() - 1) % PanelId::ALL.len()];
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        let len = self.focused_len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.focused_len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}
