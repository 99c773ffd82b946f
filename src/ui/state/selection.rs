use std::collections::BTreeSet;

/// Visual state of the "select all" header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheck {
    Unchecked,
    Indeterminate,
    Checked,
}

/// Checked row identifiers, kept independently of what is currently rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<String>,
}

impl SelectionSet {
    /// Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn select_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
    }

    pub fn clear_all(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    /// Computed from the rendered rows only, never the server-side total.
    pub fn header_state<'a>(&self, visible: impl IntoIterator<Item = &'a str>) -> HeaderCheck {
        let (total, selected) = visible.into_iter().fold((0, 0), |(total, selected), id| {
            (total + 1, selected + usize::from(self.ids.contains(id)))
        });
        if total == 0 || selected == 0 {
            HeaderCheck::Unchecked
        } else if selected == total {
            HeaderCheck::Checked
        } else {
            HeaderCheck::Indeterminate
        }
    }
}
