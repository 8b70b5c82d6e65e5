// Chunk: docs/chunks/activity_bar - Activity bar and side bar toggling
//!
//! The activity bar: a fixed-width vertical strip on the left edge of the
//! window.
//!
//! Five activity items sit at the top and a Settings item sits at the
//! bottom. Activating an activity item chooses what the side bar shows:
//! activating the item that is already active while the side bar is visible
//! hides the side bar, and anything else shows the side bar on that item.
//! Settings never affects the side bar; it toggles the theme.

use crate::geometry::Rect;

// =============================================================================
// Layout Constants
// =============================================================================

/// Width of the activity bar in pixels
pub const ACTIVITY_BAR_WIDTH: f32 = 40.0;

/// Height of each item button
pub const ITEM_HEIGHT: f32 = 32.0;

/// Top margin before the first item
pub const TOP_MARGIN: f32 = 4.0;

/// Bottom margin below the Settings item
pub const BOTTOM_MARGIN: f32 = 4.0;

// =============================================================================
// Items
// =============================================================================

/// A side bar view chosen from the activity bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Explorer,
    Search,
    SourceControl,
    RunAndDebug,
    Extensions,
}

impl Activity {
    /// Items in top-to-bottom order.
    pub const ALL: [Activity; 5] = [
        Activity::Explorer,
        Activity::Search,
        Activity::SourceControl,
        Activity::RunAndDebug,
        Activity::Extensions,
    ];

    /// Heading shown at the top of the side bar.
    pub fn title(self) -> &'static str {
        match self {
            Activity::Explorer => "Explorer",
            Activity::Search => "Search",
            Activity::SourceControl => "Source Control",
            Activity::RunAndDebug => "Run & Debug",
            Activity::Extensions => "Extensions",
        }
    }

    pub fn from_name(name: &str) -> Option<Activity> {
        let activity = match name.to_ascii_lowercase().as_str() {
            "explorer" => Activity::Explorer,
            "search" => Activity::Search,
            "scm" | "source-control" => Activity::SourceControl,
            "debug" | "run" => Activity::RunAndDebug,
            "extensions" => Activity::Extensions,
            _ => return None,
        };
        Some(activity)
    }
}

/// What a point in the activity bar lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityHit {
    Item(Activity),
    Settings,
}

/// Result of activating an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideBarChange {
    Shown(Activity),
    Hidden,
}

// =============================================================================
// Geometry
// =============================================================================

/// Computed geometry for the activity bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityBarGeometry {
    pub bounds: Rect,
    /// Item rectangles in [`Activity::ALL`] order
    pub item_rects: Vec<(Activity, Rect)>,
    pub settings_rect: Option<Rect>,
}

/// Calculates the activity bar layout for a bar `height` pixels tall.
///
/// Items that would overlap the Settings item are left out.
pub fn calculate_activity_bar_geometry(height: f32) -> ActivityBarGeometry {
    let bounds = Rect::new(0.0, 0.0, ACTIVITY_BAR_WIDTH, height);

    let settings_y = height - BOTTOM_MARGIN - ITEM_HEIGHT;
    let settings_rect =
        (settings_y >= TOP_MARGIN).then(|| Rect::new(0.0, settings_y, ACTIVITY_BAR_WIDTH, ITEM_HEIGHT));
    let limit = settings_rect.map_or(height, |r| r.y);

    let mut item_rects = Vec::with_capacity(Activity::ALL.len());
    let mut y = TOP_MARGIN;
    for activity in Activity::ALL {
        if y + ITEM_HEIGHT > limit {
            break;
        }
        item_rects.push((activity, Rect::new(0.0, y, ACTIVITY_BAR_WIDTH, ITEM_HEIGHT)));
        y += ITEM_HEIGHT;
    }

    ActivityBarGeometry {
        bounds,
        item_rects,
        settings_rect,
    }
}

impl ActivityBarGeometry {
    pub fn hit_test(&self, px: f32, py: f32) -> Option<ActivityHit> {
        if self.settings_rect.is_some_and(|r| r.contains(px, py)) {
            return Some(ActivityHit::Settings);
        }
        self.item_rects
            .iter()
            .find(|(_, rect)| rect.contains(px, py))
            .map(|(activity, _)| ActivityHit::Item(*activity))
    }
}

// =============================================================================
// State
// =============================================================================

/// Which activity is selected and whether the side bar shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityBar {
    active: Activity,
    side_bar_visible: bool,
}

impl ActivityBar {
    pub fn new() -> Self {
        Self {
            active: Activity::Explorer,
            side_bar_visible: true,
        }
    }

    pub fn active(&self) -> Activity {
        self.active
    }

    pub fn is_side_bar_visible(&self) -> bool {
        self.side_bar_visible
    }

    /// Activates `activity`.
    pub fn activate(&mut self, activity: Activity) -> SideBarChange {
        if self.active == activity && self.side_bar_visible {
            self.side_bar_visible = false;
            SideBarChange::Hidden
        } else {
            self.active = activity;
            self.side_bar_visible = true;
            SideBarChange::Shown(activity)
        }
    }

    /// Flips side bar visibility, keeping the active item.
    pub fn toggle_side_bar(&mut self) -> SideBarChange {
        self.activate(self.active)
    }
}

impl Default for ActivityBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // State Tests
    // =========================================================================

    #[test]
    fn test_starts_on_explorer_visible() {
        let bar = ActivityBar::new();
        assert_eq!(bar.active(), Activity::Explorer);
        assert!(bar.is_side_bar_visible());
    }

    #[test]
    fn test_activating_active_item_hides() {
        let mut bar = ActivityBar::new();
        assert_eq!(bar.activate(Activity::Explorer), SideBarChange::Hidden);
        assert!(!bar.is_side_bar_visible());
        assert_eq!(
            bar.activate(Activity::Explorer),
            SideBarChange::Shown(Activity::Explorer)
        );
    }

    #[test]
    fn test_activating_other_item_switches() {
        let mut bar = ActivityBar::new();
        bar.activate(Activity::Explorer);
        assert_eq!(bar.activate(Activity::Search), SideBarChange::Shown(Activity::Search));
        assert!(bar.is_side_bar_visible());
        assert_eq!(bar.active(), Activity::Search);
    }

    #[test]
    fn test_toggle_side_bar() {
        let mut bar = ActivityBar::new();
        assert_eq!(bar.toggle_side_bar(), SideBarChange::Hidden);
        assert_eq!(bar.toggle_side_bar(), SideBarChange::Shown(Activity::Explorer));
    }

    // =========================================================================
    // Geometry Tests
    // =========================================================================

    #[test]
    fn test_geometry_places_all_items() {
        let geom = calculate_activity_bar_geometry(768.0);
        assert_eq!(geom.item_rects.len(), 5);
        assert_eq!(geom.item_rects[0].1.y, TOP_MARGIN);
        let settings = geom.settings_rect.unwrap();
        assert_eq!(settings.bottom(), 768.0 - BOTTOM_MARGIN);
    }

    #[test]
    fn test_geometry_drops_items_that_do_not_fit() {
        let geom = calculate_activity_bar_geometry(100.0);
        assert!(geom.item_rects.len() < 5);
        for (_, rect) in &geom.item_rects {
            assert!(rect.bottom() <= geom.settings_rect.unwrap().y);
        }
    }

    #[test]
    fn test_hit_test() {
        let geom = calculate_activity_bar_geometry(768.0);
        let search = geom.item_rects[1].1;
        assert_eq!(
            geom.hit_test(10.0, search.y + 1.0),
            Some(ActivityHit::Item(Activity::Search))
        );
        assert_eq!(geom.hit_test(10.0, 760.0), Some(ActivityHit::Settings));
        assert_eq!(geom.hit_test(10.0, 500.0), None);
        assert_eq!(geom.hit_test(50.0, 10.0), None);
    }

    #[test]
    fn test_activity_names() {
        assert_eq!(Activity::from_name("Search"), Some(Activity::Search));
        assert_eq!(Activity::from_name("debug"), Some(Activity::RunAndDebug));
        assert_eq!(Activity::from_name("nope"), None);
        assert_eq!(Activity::RunAndDebug.title(), "Run & Debug");
    }
}
