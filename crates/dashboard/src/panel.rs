use std::collections::HashMap;

use api::Locale;

/// Remote list lifecycle for one panel. An empty `Ready` list is a valid
/// state rendered as "no articles", not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteData<T> {
    Loading,
    Ready(Vec<T>),
    Failed(&'static str),
}

impl<T> RemoteData<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RemoteData::Loading)
    }

    pub fn items(&self) -> Option<&[T]> {
        match self {
            RemoteData::Ready(items) => Some(items),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&'static str> {
        match self {
            RemoteData::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What the app should do for a panel after a locale switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDecision {
    /// Locale-independent panel; nothing changes.
    Keep,
    /// A previously fetched result for this locale was restored.
    UseCached,
    /// No cached result; the panel is now loading and needs a fetch.
    Refetch,
}

/// Generic fetch/loading/error state for one dashboard panel.
///
/// Results are cached per locale (`None` for locale-independent panels) so
/// switching back to an already-fetched locale restores the cached list
/// instead of refetching. Each panel fails independently with its own fixed
/// message; no failure propagates to other panels.
#[derive(Debug)]
pub struct Panel<T> {
    name: &'static str,
    failure_message: &'static str,
    locale_aware: bool,
    data: RemoteData<T>,
    cache: HashMap<Option<Locale>, Vec<T>>,
}

impl<T> Panel<T> {
    pub fn new(name: &'static str, failure_message: &'static str, locale_aware: bool) -> Self {
        Self {
            name,
            failure_message,
            locale_aware,
            data: RemoteData::Loading,
            cache: HashMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn locale_aware(&self) -> bool {
        self.locale_aware
    }

    pub fn data(&self) -> &RemoteData<T> {
        &self.data
    }

    fn cache_key(&self, locale: Locale) -> Option<Locale> {
        if self.locale_aware {
            Some(locale)
        } else {
            None
        }
    }

    /// Mark the panel loading for a fresh fetch.
    pub fn start_loading(&mut self) {
        self.data = RemoteData::Loading;
    }

    /// Apply a fetch failure. Stale-locale failures are dropped entirely.
    pub fn fail(&mut self, fetched: Locale, current: Locale) {
        if self.cache_key(fetched) == self.cache_key(current) {
            self.data = RemoteData::Failed(self.failure_message);
        }
    }
}

/// Cache population clones the fetched list; everything else is read-only.
impl<T: Clone> Panel<T> {
    /// Apply a fetched result. `fetched` is the locale the request was
    /// issued under, `current` the locale now selected; a result for a
    /// stale locale only fills the cache, the visible list is untouched.
    pub fn resolve(&mut self, fetched: Locale, current: Locale, items: Vec<T>) {
        let key = self.cache_key(fetched);
        self.cache.insert(key, items.clone());
        if key == self.cache_key(current) {
            self.data = RemoteData::Ready(items);
        }
    }

    /// React to a locale switch: restore the cached list for the new locale
    /// or go loading and ask the caller to refetch. Locale-independent
    /// panels never change their fetched path and keep their state.
    pub fn on_locale_change(&mut self, locale: Locale) -> FetchDecision {
        if !self.locale_aware {
            return FetchDecision::Keep;
        }
        match self.cache.get(&Some(locale)) {
            Some(items) => {
                self.data = RemoteData::Ready(items.clone());
                FetchDecision::UseCached
            }
            None => {
                self.data = RemoteData::Loading;
                FetchDecision::Refetch
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aware() -> Panel<&'static str> {
        Panel::new("cloud feed", "フィードの取得に失敗しました。", true)
    }

    fn unaware() -> Panel<&'static str> {
        Panel::new("golang weekly", "フィードの取得に失敗しました。", false)
    }

    #[test]
    fn starts_loading() {
        assert!(aware().data().is_loading());
    }

    #[test]
    fn read_accessors_work_without_clone() {
        // Render code only ever reads; items need not be cloneable for that.
        struct NotClone;
        let mut panel: Panel<NotClone> =
            Panel::new("cloud feed", "フィードの取得に失敗しました。", true);
        assert_eq!(panel.name(), "cloud feed");
        assert!(panel.locale_aware());
        assert!(panel.data().is_loading());

        panel.fail(Locale::Ja, Locale::Ja);
        assert!(panel.data().failure().is_some());
    }

    #[test]
    fn resolve_replaces_the_list_wholesale() {
        let mut panel = aware();
        panel.resolve(Locale::Ja, Locale::Ja, vec!["old"]);
        panel.resolve(Locale::Ja, Locale::Ja, vec!["new-1", "new-2"]);
        assert_eq!(panel.data().items(), Some(&["new-1", "new-2"][..]));
    }

    #[test]
    fn failure_shows_the_panel_specific_message() {
        let mut panel = aware();
        panel.fail(Locale::Ja, Locale::Ja);
        assert_eq!(panel.data().failure(), Some("フィードの取得に失敗しました。"));
    }

    #[test]
    fn empty_result_is_ready_not_failed() {
        let mut panel = aware();
        panel.resolve(Locale::Ja, Locale::Ja, vec![]);
        assert_eq!(panel.data().items(), Some(&[][..]));
        assert!(panel.data().failure().is_none());
    }

    #[test]
    fn locale_switch_refetches_when_uncached() {
        let mut panel = aware();
        panel.resolve(Locale::Ja, Locale::Ja, vec!["ja-article"]);

        assert_eq!(panel.on_locale_change(Locale::En), FetchDecision::Refetch);
        assert!(panel.data().is_loading());
    }

    #[test]
    fn locale_switch_restores_cached_result() {
        let mut panel = aware();
        panel.resolve(Locale::Ja, Locale::Ja, vec!["ja-article"]);
        panel.on_locale_change(Locale::En);
        panel.resolve(Locale::En, Locale::En, vec!["en-article"]);

        // Switching back does not need a refetch.
        assert_eq!(panel.on_locale_change(Locale::Ja), FetchDecision::UseCached);
        assert_eq!(panel.data().items(), Some(&["ja-article"][..]));
    }

    #[test]
    fn locale_independent_panel_keeps_its_state() {
        let mut panel = unaware();
        panel.resolve(Locale::Ja, Locale::Ja, vec!["issue-1"]);

        assert_eq!(panel.on_locale_change(Locale::En), FetchDecision::Keep);
        assert_eq!(panel.data().items(), Some(&["issue-1"][..]));
    }

    #[test]
    fn locale_independent_panel_resolves_under_any_locale() {
        let mut panel = unaware();
        // Fetched while ja was selected, applied while en is selected: same
        // cache slot, so the result is displayed.
        panel.resolve(Locale::Ja, Locale::En, vec!["issue-1"]);
        assert_eq!(panel.data().items(), Some(&["issue-1"][..]));
    }

    #[test]
    fn stale_locale_result_fills_cache_without_touching_display() {
        let mut panel = aware();
        panel.on_locale_change(Locale::En);
        panel.resolve(Locale::En, Locale::En, vec!["en-article"]);

        // A slow ja fetch resolves after the user switched to en.
        panel.resolve(Locale::Ja, Locale::En, vec!["ja-article"]);
        assert_eq!(panel.data().items(), Some(&["en-article"][..]));

        // But the late result still serves the cache.
        assert_eq!(panel.on_locale_change(Locale::Ja), FetchDecision::UseCached);
        assert_eq!(panel.data().items(), Some(&["ja-article"][..]));
    }

    #[test]
    fn stale_locale_failure_is_dropped() {
        let mut panel = aware();
        panel.resolve(Locale::En, Locale::En, vec!["en-article"]);
        panel.fail(Locale::Ja, Locale::En);
        assert_eq!(panel.data().items(), Some(&["en-article"][..]));
    }
}
