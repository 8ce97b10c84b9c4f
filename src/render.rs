use crate::errors::FetchError;
use crate::models::{Difficulty, ProgressEntry, UserProgress};

/// Receives the outcome of a search. Implemented by whatever owns the visible widgets.
pub trait Renderer: Send {
    /// Disables the search control and shows an in-flight label, or restores it.
    fn set_busy(&mut self, busy: bool);
    fn show_progress(&mut self, progress: &UserProgress);
    fn show_error(&mut self, error: &FetchError);
}

/// Holds the search control in its busy state until dropped.
pub struct BusyControl<'a, R: Renderer + ?Sized> {
    renderer: &'a mut R,
}

impl<'a, R: Renderer + ?Sized> BusyControl<'a, R> {
    pub fn acquire(renderer: &'a mut R) -> Self {
        renderer.set_busy(true);
        Self { renderer }
    }
}

impl<R: Renderer + ?Sized> Drop for BusyControl<'_, R> {
    fn drop(&mut self) {
        self.renderer.set_busy(false);
    }
}

pub const SEARCH_LABEL: &str = "Search";
pub const LOADING_LABEL: &str = "Loading...";

/// Per-difficulty text label and fill width.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub difficulty: Difficulty,
    pub label: String,
    pub width_percent: f64,
}

impl From<&ProgressEntry> for ProgressView {
    fn from(entry: &ProgressEntry) -> Self {
        Self {
            difficulty: entry.difficulty,
            label: entry.label(),
            width_percent: entry.percent(),
        }
    }
}

impl ProgressView {
    fn empty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            label: "0/0".to_string(),
            width_percent: 0.0,
        }
    }
}

/// Everything the page template needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub username: String,
    pub button_label: &'static str,
    pub button_disabled: bool,
    pub status: Option<String>,
    pub progress: [ProgressView; 3],
}

impl Default for SearchView {
    fn default() -> Self {
        Self {
            username: String::new(),
            button_label: SEARCH_LABEL,
            button_disabled: false,
            status: None,
            progress: Difficulty::ALL.map(ProgressView::empty),
        }
    }
}

/// Renders into a [`SearchView`] for server-side page output.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    view: SearchView,
}

impl HtmlRenderer {
    pub fn new(username: &str) -> Self {
        Self {
            view: SearchView {
                username: username.to_string(),
                ..SearchView::default()
            },
        }
    }

    pub fn view(&self) -> &SearchView {
        &self.view
    }

    pub fn into_view(self) -> SearchView {
        self.view
    }
}

impl Renderer for HtmlRenderer {
    fn set_busy(&mut self, busy: bool) {
        self.view.button_disabled = busy;
        self.view.button_label = if busy { LOADING_LABEL } else { SEARCH_LABEL };
    }

    fn show_progress(&mut self, progress: &UserProgress) {
        self.view.status = None;
        self.view.progress = progress.entries.each_ref().map(ProgressView::from);
    }

    fn show_error(&mut self, error: &FetchError) {
        self.view.status = Some(error.user_message().to_string());
    }
}
