//! Viewport classification and responsive presets
//!
//! The showcase adapts to a coarse device class (Desktop/Mobile) derived from
//! a max-width media query over the window, OR'd with an override supplied by
//! the page layout. The query keeps an explicit listener table; subscribers
//! hold an RAII guard so the listener is released on every teardown path.

use bevy::prelude::*;
use bevy::window::WindowResized;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

/// Coarse device-capability class driving rendering parameter choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportClass {
    #[default]
    Desktop,
    Mobile,
}

impl ViewportClass {
    /// Combine the media-query result with the page-level override.
    /// Either signal alone is enough to select Mobile.
    pub fn classify(query_matches: bool, parent_is_mobile: bool) -> Self {
        if query_matches || parent_is_mobile {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == ViewportClass::Mobile
    }
}

/// Model placement preset selected by viewport class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPreset {
    pub scale: f32,
    pub position: Vec3,
}

impl ModelPreset {
    pub const fn for_class(class: ViewportClass) -> Self {
        match class {
            ViewportClass::Desktop => Self {
                scale: 0.75,
                position: Vec3::new(0.0, -3.25, -1.5),
            },
            ViewportClass::Mobile => Self {
                scale: 0.6,
                position: Vec3::new(0.0, -2.5, -2.2),
            },
        }
    }
}

/// Light intensity factors selected by viewport class.
///
/// These are dimensionless multipliers applied to the rig's base photometric
/// intensities; mobile halves the spot and point fill to bound fragment cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingPreset {
    pub hemisphere: f32,
    pub spot: f32,
    pub point: f32,
}

impl LightingPreset {
    pub const fn for_class(class: ViewportClass) -> Self {
        match class {
            ViewportClass::Desktop => Self {
                hemisphere: 0.15,
                spot: 1.0,
                point: 1.0,
            },
            ViewportClass::Mobile => Self {
                hemisphere: 0.15,
                spot: 0.5,
                point: 0.5,
            },
        }
    }
}

type Listener = Box<dyn FnMut(bool) + Send>;

struct MediaQueryInner {
    max_width: f32,
    /// None until the first observation
    matches: Option<bool>,
    next_token: u64,
    listeners: Vec<(u64, Listener)>,
}

/// A max-width predicate over the window, re-evaluated on resize
/// notifications. Listeners fire at most once per match-state flip.
///
/// Listeners run under the query's lock and must not call back into it.
#[derive(Clone)]
pub struct MediaQuery {
    inner: Arc<Mutex<MediaQueryInner>>,
}

impl MediaQuery {
    pub fn new(max_width: f32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MediaQueryInner {
                max_width,
                matches: None,
                next_token: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Current match state (false before the first observation)
    pub fn matches(&self) -> bool {
        self.inner.lock().expect("media query lock").matches.unwrap_or(false)
    }

    /// Feed a window width into the query. Dispatches to listeners only when
    /// the match state actually changes.
    pub fn observe(&self, width: f32) {
        let mut inner = self.inner.lock().expect("media query lock");
        let matches = width <= inner.max_width;
        if inner.matches == Some(matches) {
            return;
        }
        inner.matches = Some(matches);
        for (_, listener) in inner.listeners.iter_mut() {
            listener(matches);
        }
    }

    /// Register a change listener. The listener stays registered for exactly
    /// as long as the returned guard lives.
    #[must_use = "dropping the guard unsubscribes the listener"]
    pub fn subscribe(&self, listener: Listener) -> SubscriptionGuard {
        let mut inner = self.inner.lock().expect("media query lock");
        let token = inner.next_token;
        inner.next_token += 1;
        inner.listeners.push((token, listener));
        SubscriptionGuard {
            query: Arc::downgrade(&self.inner),
            token,
        }
    }
}

/// Scoped listener registration: dropping the guard removes the listener,
/// so an owner torn down on any path cannot leak its subscription.
pub struct SubscriptionGuard {
    query: Weak<Mutex<MediaQueryInner>>,
    token: u64,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.query.upgrade() {
            if let Ok(mut inner) = inner.lock() {
                inner.listeners.retain(|(token, _)| *token != self.token);
            }
        }
    }
}

/// The showcase's view of the current viewport, recomputed on resize and on
/// page-layout override changes
#[derive(Resource)]
pub struct ViewportState {
    class: ViewportClass,
    parent_is_mobile: bool,
    query: MediaQuery,
    matched: Arc<AtomicBool>,
    _subscription: SubscriptionGuard,
}

impl ViewportState {
    pub fn new(mobile_breakpoint: f32) -> Self {
        let query = MediaQuery::new(mobile_breakpoint);
        let matched = Arc::new(AtomicBool::new(false));
        let sink = Arc::clone(&matched);
        let subscription =
            query.subscribe(Box::new(move |matches| sink.store(matches, Ordering::Relaxed)));
        Self {
            class: ViewportClass::Desktop,
            parent_is_mobile: false,
            query,
            matched,
            _subscription: subscription,
        }
    }

    pub fn class(&self) -> ViewportClass {
        self.class
    }

    /// Update the page-layout override (the upstream `isMobile` prop)
    pub fn set_parent_is_mobile(&mut self, parent_is_mobile: bool) {
        if self.parent_is_mobile != parent_is_mobile {
            self.parent_is_mobile = parent_is_mobile;
            self.refresh();
        }
    }

    /// Feed a window width observation through the media query
    pub fn observe_width(&mut self, width: f32) {
        self.query.observe(width);
        self.refresh();
    }

    fn refresh(&mut self) {
        let class =
            ViewportClass::classify(self.matched.load(Ordering::Relaxed), self.parent_is_mobile);
        if class != self.class {
            tracing::debug!("Viewport class changed to {:?}", class);
            self.class = class;
        }
    }
}

/// Seed the viewport class from the initial window size
pub(crate) fn init_viewport(
    mut state: ResMut<ViewportState>,
    windows: Query<&Window>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    state.observe_width(window.width());
}

/// Track window resizes. Notifications arrive at most once per physical
/// change and may race an in-flight frame; the class is eventually
/// consistent, never frame-synchronous.
pub(crate) fn track_viewport(
    mut state: ResMut<ViewportState>,
    mut resized: EventReader<WindowResized>,
) {
    for event in resized.read() {
        state.observe_width(event.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_classify_or_semantics() {
        assert_eq!(ViewportClass::classify(true, false), ViewportClass::Mobile);
        assert_eq!(ViewportClass::classify(false, true), ViewportClass::Mobile);
        assert_eq!(ViewportClass::classify(true, true), ViewportClass::Mobile);
        assert_eq!(ViewportClass::classify(false, false), ViewportClass::Desktop);
    }

    #[test]
    fn test_media_query_dispatches_once_per_flip() {
        let query = MediaQuery::new(500.0);
        let calls = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&calls);
        let _guard = query.subscribe(Box::new(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        }));

        query.observe(400.0); // no match yet -> flip to true
        query.observe(450.0); // still matching, no dispatch
        query.observe(800.0); // flip to false
        query.observe(900.0); // still false, no dispatch

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!query.matches());
    }

    #[test]
    fn test_dropped_guard_stops_dispatch() {
        let query = MediaQuery::new(500.0);
        let calls = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&calls);
        let guard = query.subscribe(Box::new(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        }));

        query.observe(400.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        drop(guard);
        query.observe(800.0); // flip after unsubscribe: nothing fires, nothing panics
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_viewport_state_combines_query_and_override() {
        let mut state = ViewportState::new(500.0);
        assert_eq!(state.class(), ViewportClass::Desktop);

        // Query matches "<= 500 width"
        state.observe_width(480.0);
        assert_eq!(state.class(), ViewportClass::Mobile);

        // Query stops matching but the page override holds Mobile
        state.set_parent_is_mobile(true);
        state.observe_width(1200.0);
        assert_eq!(state.class(), ViewportClass::Mobile);

        state.set_parent_is_mobile(false);
        assert_eq!(state.class(), ViewportClass::Desktop);
    }

    #[test]
    fn test_model_presets() {
        let desktop = ModelPreset::for_class(ViewportClass::Desktop);
        assert_eq!(desktop.scale, 0.75);
        assert_eq!(desktop.position, Vec3::new(0.0, -3.25, -1.5));

        let mobile = ModelPreset::for_class(ViewportClass::Mobile);
        assert_eq!(mobile.scale, 0.6);
        assert_eq!(mobile.position, Vec3::new(0.0, -2.5, -2.2));
    }

    #[test]
    fn test_lighting_presets() {
        let desktop = LightingPreset::for_class(ViewportClass::Desktop);
        assert_eq!(desktop.spot, 1.0);
        assert_eq!(desktop.point, 1.0);

        let mobile = LightingPreset::for_class(ViewportClass::Mobile);
        assert_eq!(mobile.spot, 0.5);
        assert_eq!(mobile.point, 0.5);
        assert_eq!(mobile.hemisphere, desktop.hemisphere);
    }
}
