use crate::domain::wire::FormPairs;

/// A list request tagged with the sequence number it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub form: FormPairs,
}

/// Hands out increasing sequence numbers; only the newest one may render.
#[derive(Debug, Clone, Default)]
pub struct FetchTracker {
    latest: u64,
}

impl FetchTracker {
    pub fn issue(&mut self, form: FormPairs) -> FetchTicket {
        self.latest += 1;
        FetchTicket {
            seq: self.latest,
            form,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub id: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Ready,
    Empty,
}

/// The last successful render plus what is on screen right now.
///
/// Loading hides the rows without dropping them, so a failed fetch can put
/// them back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    rows: Vec<DisplayRow>,
    total_pages: i64,
    phase: LoadPhase,
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            total_pages: 0,
            phase: LoadPhase::Idle,
        }
    }
}

impl ListView {
    pub fn start_loading(&mut self) {
        self.phase = LoadPhase::Loading;
    }

    pub fn render(&mut self, rows: Vec<DisplayRow>, total_pages: i64) {
        self.phase = if rows.is_empty() {
            LoadPhase::Empty
        } else {
            LoadPhase::Ready
        };
        self.rows = rows;
        self.total_pages = total_pages.max(0);
    }

    pub fn restore(&mut self) {
        self.phase = if self.rows.is_empty() {
            LoadPhase::Empty
        } else {
            LoadPhase::Ready
        };
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }

    pub fn visible_rows(&self) -> &[DisplayRow] {
        match self.phase {
            LoadPhase::Ready => &self.rows,
            LoadPhase::Idle | LoadPhase::Loading | LoadPhase::Empty => &[],
        }
    }

    pub fn visible_ids(&self) -> impl Iterator<Item = &str> {
        self.visible_rows().iter().map(|row| row.id.as_str())
    }
}
