//! Result-set presentation: picks a rendering strategy from the viewport and
//! turns records into display rows.
//!
//! Both strategies build rows through [`RecordRow::from_record`], so a record
//! shows the same fields whichever layout is active.

use std::ops::Range;

use crate::{EmailVerificationRecord, Facet, FacetGroup, VerificationStatus};

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Estimated height of one result card in the virtualized list.
pub const DEFAULT_ROW_HEIGHT: u32 = 300;
pub const DEFAULT_LIST_HEIGHT: u32 = 600;
/// Rows materialized beyond each edge of the visible window.
pub const OVERSCAN_ROWS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenClass {
    Small,
    Regular,
}

impl ScreenClass {
    /// `Small` strictly below the medium breakpoint.
    pub fn from_width(width: u32, medium_breakpoint: u32) -> Self {
        if width < medium_breakpoint {
            ScreenClass::Small
        } else {
            ScreenClass::Regular
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Bad,
    Warning,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetCell {
    pub facet: Facet,
    pub value: bool,
    pub text: &'static str,
    pub tone: Tone,
}

impl FacetCell {
    fn new(facet: Facet, value: bool) -> Self {
        let (text, tone) = match facet {
            // Pass/fail checks.
            Facet::Syntax
            | Facet::Dns
            | Facet::Smtp
            | Facet::Mailbox
            | Facet::Spf
            | Facet::Dkim => {
                if value {
                    ("Valid", Tone::Good)
                } else {
                    ("Invalid", Tone::Bad)
                }
            }
            // Provider traits where "yes" counts against the address.
            Facet::Disposable | Facet::FreeProvider => {
                if value {
                    ("Yes", Tone::Bad)
                } else {
                    ("No", Tone::Good)
                }
            }
            Facet::CatchAll | Facet::RoleAccount => {
                if value {
                    ("Yes", Tone::Warning)
                } else {
                    ("No", Tone::Neutral)
                }
            }
        };
        Self {
            facet,
            value,
            text,
            tone,
        }
    }
}

/// Display fields for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    /// Position in the full record set.
    pub index: usize,
    pub email: String,
    pub status: VerificationStatus,
    pub badge: StatusBadge,
    pub reason: Option<String>,
    pub facets: Vec<FacetCell>,
}

impl RecordRow {
    pub fn from_record(index: usize, record: &EmailVerificationRecord) -> Self {
        let badge = if record.is_valid() {
            StatusBadge::Success
        } else {
            StatusBadge::Error
        };
        Self {
            index,
            email: record.email.clone(),
            status: record.status,
            badge,
            reason: record.reason.clone(),
            facets: Facet::ALL
                .iter()
                .map(|&facet| FacetCell::new(facet, record.facet(facet)))
                .collect(),
        }
    }

    pub fn facets_in(&self, group: FacetGroup) -> impl Iterator<Item = &FacetCell> {
        self.facets
            .iter()
            .filter(move |cell| cell.facet.group() == group)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedRow {
    /// Distance from the top of the scrollable content.
    pub offset: u64,
    pub row: RecordRow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLayout {
    pub total_rows: usize,
    pub total_height: u64,
    pub scroll_offset: u32,
    pub visible: Range<usize>,
    pub rows: Vec<PositionedRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub page_size_options: &'static [usize],
    pub range_label: String,
    pub rows: Vec<RecordRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsLayout {
    List(ListLayout),
    Table(TableLayout),
}

impl ResultsLayout {
    pub fn rows(&self) -> Box<dyn Iterator<Item = &RecordRow> + '_> {
        match self {
            ResultsLayout::List(list) => Box::new(list.rows.iter().map(|positioned| &positioned.row)),
            ResultsLayout::Table(table) => Box::new(table.rows.iter()),
        }
    }
}

/// A way of laying out a record set.
pub trait RenderStrategy {
    fn render(&self, records: &[EmailVerificationRecord]) -> ResultsLayout;
}

/// Fixed-height rows where only the scroll window (plus overscan) is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualizedList {
    pub row_height: u32,
    pub viewport_height: u32,
    pub scroll_offset: u32,
    pub overscan: usize,
}

impl VirtualizedList {
    pub fn visible_range(&self, total: usize) -> Range<usize> {
        if total == 0 || self.row_height == 0 {
            return 0..0;
        }

        let row_height = u64::from(self.row_height);
        let first_visible = (u64::from(self.scroll_offset) / row_height) as usize;
        // Rows overlapping the window end where its bottom edge falls.
        let bottom = u64::from(self.scroll_offset) + u64::from(self.viewport_height);
        let last_visible_end = usize::try_from(bottom.div_ceil(row_height)).unwrap_or(usize::MAX);

        let end = last_visible_end.saturating_add(self.overscan).min(total);
        let start = first_visible.saturating_sub(self.overscan).min(end);
        start..end
    }

    pub fn total_height(&self, total: usize) -> u64 {
        total as u64 * u64::from(self.row_height)
    }
}

impl RenderStrategy for VirtualizedList {
    fn render(&self, records: &[EmailVerificationRecord]) -> ResultsLayout {
        let visible = self.visible_range(records.len());
        let rows = visible
            .clone()
            .map(|index| PositionedRow {
                offset: index as u64 * u64::from(self.row_height),
                row: RecordRow::from_record(index, &records[index]),
            })
            .collect();

        ResultsLayout::List(ListLayout {
            total_rows: records.len(),
            total_height: self.total_height(records.len()),
            scroll_offset: self.scroll_offset,
            visible,
            rows,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginatedTable {
    pub page: usize,
    pub page_size: usize,
}

impl PaginatedTable {
    pub fn page_count(&self, total: usize) -> usize {
        page_count(total, self.page_size)
    }

    /// Index range of the current page, with the page clamped into range.
    pub fn page_range(&self, total: usize) -> Range<usize> {
        let size = self.page_size.max(1);
        let page = self.page.clamp(1, self.page_count(total));
        let start = ((page - 1) * size).min(total);
        let end = (start + size).min(total);
        start..end
    }
}

impl RenderStrategy for PaginatedTable {
    fn render(&self, records: &[EmailVerificationRecord]) -> ResultsLayout {
        let total = records.len();
        let range = self.page_range(total);
        let range_label = if range.is_empty() {
            format!("0-0 of {total} items")
        } else {
            format!("{}-{} of {} items", range.start + 1, range.end, total)
        };
        let rows = range
            .clone()
            .map(|index| RecordRow::from_record(index, &records[index]))
            .collect();

        ResultsLayout::Table(TableLayout {
            page: self.page.clamp(1, self.page_count(total)),
            page_size: self.page_size,
            page_count: self.page_count(total),
            page_size_options: &PAGE_SIZE_OPTIONS,
            range_label,
            rows,
        })
    }
}

fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Viewport and navigation state shared by both strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationState {
    pub viewport_width: u32,
    pub medium_breakpoint: u32,
    pub row_height: u32,
    pub list_height: u32,
    pub scroll_offset: u32,
    pub page: usize,
    pub page_size: usize,
}

impl Default for PresentationState {
    fn default() -> Self {
        Self {
            viewport_width: 1024,
            medium_breakpoint: 768,
            row_height: DEFAULT_ROW_HEIGHT,
            list_height: DEFAULT_LIST_HEIGHT,
            scroll_offset: 0,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PresentationState {
    pub fn screen_class(&self) -> ScreenClass {
        ScreenClass::from_width(self.viewport_width, self.medium_breakpoint)
    }

    /// Small screens get the virtualized list, everything else the table.
    pub fn strategy(&self) -> Box<dyn RenderStrategy> {
        match self.screen_class() {
            ScreenClass::Small => Box::new(VirtualizedList {
                row_height: self.row_height,
                viewport_height: self.list_height,
                scroll_offset: self.scroll_offset,
                overscan: OVERSCAN_ROWS,
            }),
            ScreenClass::Regular => Box::new(PaginatedTable {
                page: self.page,
                page_size: self.page_size,
            }),
        }
    }

    pub fn layout(&self, records: &[EmailVerificationRecord]) -> ResultsLayout {
        self.strategy().render(records)
    }

    /// Returns `false` (and changes nothing) for sizes outside
    /// [`PAGE_SIZE_OPTIONS`].
    pub fn set_page_size(&mut self, page_size: usize, total: usize) -> bool {
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return false;
        }
        self.page_size = page_size;
        self.clamp_to(total);
        true
    }

    pub fn set_page(&mut self, page: usize, total: usize) {
        self.page = page.clamp(1, page_count(total, self.page_size));
    }

    pub fn scroll_to(&mut self, offset: u32, total: usize) {
        self.scroll_offset = offset.min(self.max_scroll_offset(total));
    }

    pub fn max_scroll_offset(&self, total: usize) -> u32 {
        let content = total as u64 * u64::from(self.row_height);
        let max = content.saturating_sub(u64::from(self.list_height));
        u32::try_from(max).unwrap_or(u32::MAX)
    }

    /// Pulls page and scroll position back into range for a record set of
    /// `total` rows.
    pub fn clamp_to(&mut self, total: usize) {
        self.set_page(self.page, total);
        self.scroll_to(self.scroll_offset, total);
    }
}
