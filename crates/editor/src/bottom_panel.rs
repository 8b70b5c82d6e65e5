// Chunk: docs/chunks/bottom_panel - Terminal, output and problems panel
//!
//! The bottom panel under the editor area.
//!
//! It holds three plain-text tabs. Writing to a tab replaces its text. The
//! panel has a fixed height and is visible by default; the status bar
//! toggles it.

/// Height of the bottom panel in pixels
pub const BOTTOM_PANEL_HEIGHT: f32 = 160.0;

/// A bottom panel tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTab {
    Terminal,
    Output,
    Problems,
}

impl PanelTab {
    pub const ALL: [PanelTab; 3] = [PanelTab::Terminal, PanelTab::Output, PanelTab::Problems];

    pub fn title(self) -> &'static str {
        match self {
            PanelTab::Terminal => "Terminal",
            PanelTab::Output => "Output",
            PanelTab::Problems => "Problems",
        }
    }

    fn index(self) -> usize {
        match self {
            PanelTab::Terminal => 0,
            PanelTab::Output => 1,
            PanelTab::Problems => 2,
        }
    }

    pub fn from_name(name: &str) -> Option<PanelTab> {
        PanelTab::ALL
            .into_iter()
            .find(|tab| tab.title().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BottomPanel {
    texts: [String; 3],
    selected: PanelTab,
    visible: bool,
}

impl BottomPanel {
    pub fn new() -> Self {
        Self {
            texts: Default::default(),
            selected: PanelTab::Terminal,
            visible: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn toggle_visibility(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn selected(&self) -> PanelTab {
        self.selected
    }

    pub fn show(&mut self, tab: PanelTab) {
        self.selected = tab;
    }

    /// Replaces the text of `tab`.
    pub fn write(&mut self, tab: PanelTab, text: impl Into<String>) {
        self.texts[tab.index()] = text.into();
    }

    pub fn text(&self, tab: PanelTab) -> &str {
        &self.texts[tab.index()]
    }

    /// Height the panel takes in the layout.
    pub fn height(&self) -> f32 {
        if self.visible {
            BOTTOM_PANEL_HEIGHT
        } else {
            0.0
        }
    }
}

impl Default for BottomPanel {
    fn default() -> Self {
        Self::new()
    }
}
