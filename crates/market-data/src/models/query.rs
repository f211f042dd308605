use super::trade_date::TradeDate;
use super::types::SortOrder;

/// Parameters for a history fetch
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Inclusive lower bound; `None` means unbounded
    pub from: Option<TradeDate>,

    /// Inclusive upper bound; `None` means unbounded
    pub to: Option<TradeDate>,

    pub order: SortOrder,
}

impl HistoryQuery {
    /// Bounded range with the given order
    pub fn between(from: TradeDate, to: TradeDate, order: SortOrder) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            order,
        }
    }

    /// Whether an ISO `YYYY-MM-DD` date falls inside the range.
    ///
    /// ISO dates order correctly under plain string comparison.
    pub fn contains(&self, date: &str) -> bool {
        self.from.as_ref().map_or(true, |from| date >= from.iso())
            && self.to.as_ref().map_or(true, |to| date <= to.iso())
    }
}
