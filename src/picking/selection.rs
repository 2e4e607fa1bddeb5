/// Hovered and selected region names for one view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSelection {
    hovered: Option<String>,
    selected: Vec<String>,
}

impl RegionSelection {
    /// Nothing hovered or selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Region currently under the cursor.
    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Selected regions in click order.
    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Update the hovered region. Returns whether it changed.
    pub fn set_hovered(&mut self, region: Option<&str>) -> bool {
        if self.hovered.as_deref() == region {
            return false;
        }
        self.hovered = region.map(str::to_owned);
        true
    }

    /// Process a click on the hovered region.
    ///
    /// A plain click selects only the hovered region; with `toggle` held it
    /// adds or removes it instead. Clicking empty space clears the
    /// selection. Returns `true` if the selection changed.
    pub fn handle_click(&mut self, toggle: bool) -> bool {
        let Some(hit) = self.hovered.clone() else {
            if self.selected.is_empty() {
                return false;
            }
            self.selected.clear();
            return true;
        };

        if toggle {
            if let Some(pos) = self.selected.iter().position(|r| *r == hit) {
                let _ = self.selected.remove(pos);
            } else {
                self.selected.push(hit);
            }
        } else {
            if self.selected.len() == 1 && self.selected[0] == hit {
                return false;
            }
            self.selected.clear();
            self.selected.push(hit);
        }
        true
    }

    /// Clear hover and selection.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.hovered = None;
    }
}
