use crate::timestamp::Timestamp;

/// Resolved `datesplit` options. Built once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateSplitConfig {
    pub emit_date_only: bool,
    /// 1-based indices into [`Field::TABLE`], caller order, duplicates kept.
    pub selected_fields: Vec<usize>,
    pub after: Option<Timestamp>,
    pub before: Option<Timestamp>,
    /// Lines with an index below this are consumed without being emitted.
    pub skip_count: Option<usize>,
}

/// Highest field index a caller may select. The zone offset (8) is only
/// reachable through the default layout.
pub const MAX_SELECTABLE_FIELD: usize = 7;

impl DateSplitConfig {
    /// Appends field indices, silently dropping anything outside 1..=7.
    pub fn push_fields<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = i64>,
    {
        self.selected_fields.extend(
            fields
                .into_iter()
                .filter(|f| (1..=MAX_SELECTABLE_FIELD as i64).contains(f))
                .map(|f| f as usize),
        );
    }

    /// `--skip COUNT` means "start at line COUNT", 1 being the first line.
    pub fn set_skip(&mut self, count: u64) {
        self.skip_count = Some(count.saturating_sub(1) as usize);
    }

    pub fn window(&self) -> FilterWindow {
        match (self.after, self.before) {
            (Some(after), Some(before)) => FilterWindow::Both { after, before },
            (Some(after), None) => FilterWindow::AfterOnly(after),
            (None, Some(before)) => FilterWindow::BeforeOnly(before),
            (None, None) => FilterWindow::NoFilter,
        }
    }

    pub fn layout(&self) -> FieldLayout {
        if self.emit_date_only {
            FieldLayout::DateOnly
        } else if !self.selected_fields.is_empty() {
            FieldLayout::Fields(
                self.selected_fields
                    .iter()
                    .filter_map(|&i| Field::from_index(i))
                    .collect(),
            )
        } else {
            FieldLayout::Full
        }
    }
}

/// Inclusive timestamp range a line must fall in to be emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterWindow {
    NoFilter,
    AfterOnly(Timestamp),
    BeforeOnly(Timestamp),
    Both { after: Timestamp, before: Timestamp },
}

impl FilterWindow {
    pub fn suppresses(&self, ts: &Timestamp) -> bool {
        match self {
            FilterWindow::NoFilter => false,
            FilterWindow::AfterOnly(after) => ts < after,
            FilterWindow::BeforeOnly(before) => ts > before,
            FilterWindow::Both { after, before } => ts < after || ts > before,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Weekday,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Offset,
}

impl Field {
    /// Index `i` (1-based) maps to `TABLE[i - 1]`.
    pub const TABLE: [Field; 8] = [
        Field::Weekday,
        Field::Year,
        Field::Month,
        Field::Day,
        Field::Hour,
        Field::Minute,
        Field::Second,
        Field::Offset,
    ];

    pub fn from_index(index: usize) -> Option<Field> {
        index.checked_sub(1).and_then(|i| Self::TABLE.get(i).copied())
    }

    pub fn strftime(self) -> &'static str {
        match self {
            Field::Weekday => "%a",
            Field::Year => "%Y",
            Field::Month => "%m",
            Field::Day => "%d",
            Field::Hour => "%H",
            Field::Minute => "%M",
            Field::Second => "%S",
            Field::Offset => "%z",
        }
    }
}

/// How a matched timestamp is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLayout {
    DateOnly,
    Fields(Vec<Field>),
    Full,
}

impl FieldLayout {
    pub fn strftime(&self) -> String {
        match self {
            FieldLayout::DateOnly => "%Y %m %d".to_string(),
            FieldLayout::Fields(fields) => fields
                .iter()
                .map(|f| f.strftime())
                .collect::<Vec<_>>()
                .join(" "),
            FieldLayout::Full => "%Y %m %d %H %M %S %z".to_string(),
        }
    }

    pub fn render(&self, ts: &Timestamp) -> String {
        ts.format(&self.strftime()).to_string()
    }
}
