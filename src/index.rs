//! The day index and same-day ordering.
//!
//! [`DayIndex`] is built once per run from the normalized events and is then
//! only read: the planner and every renderer receive it by reference. Events
//! are stored in dataset order; [`order`] sorts a day's events for display.

use crate::event::Event;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Composite `(month, day)` key. Year-agnostic: recurring events and events
/// of the target year share keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }
}

/// Read-only mapping from calendar day to the events on it.
#[derive(Debug, Default)]
pub struct DayIndex {
    days: BTreeMap<MonthDay, Vec<Event>>,
    len: usize,
}

impl DayIndex {
    /// Group `events` by `(month, day)`, keeping input order and duplicates.
    pub fn build(events: impl IntoIterator<Item = Event>) -> Self {
        let mut days: BTreeMap<MonthDay, Vec<Event>> = BTreeMap::new();
        let mut len = 0;
        for event in events {
            days.entry(MonthDay::new(event.month, event.day))
                .or_default()
                .push(event);
            len += 1;
        }
        Self { days, len }
    }

    /// Every event indexed under `(month, day)`, verified or not.
    pub fn lookup(&self, month: u32, day: u32) -> &[Event] {
        self.days
            .get(&MonthDay::new(month, day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Events that may be shown on `(month, day)`: verified ones only.
    pub fn visible(&self, month: u32, day: u32) -> impl Iterator<Item = &Event> {
        self.lookup(month, day).iter().filter(|e| e.verified)
    }

    pub fn has_visible(&self, month: u32, day: u32) -> bool {
        self.visible(month, day).next().is_some()
    }

    /// Total number of indexed events.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct days with at least one indexed event.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }
}

/// Display priority of a scope: Ukraine first, then Türkiye, then the rest.
pub fn scope_priority(scope: &str) -> u8 {
    match scope {
        "ua" => 0,
        "tr" => 1,
        _ => 2,
    }
}

fn compare(a: &Event, b: &Event) -> Ordering {
    scope_priority(&a.scope)
        .cmp(&scope_priority(&b.scope))
        .then_with(|| a.kind.cmp(&b.kind))
}

/// Sort one day's events by scope priority, then by type.
///
/// Stable: events with equal keys keep their input order.
pub fn order<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<&'a Event> {
    let mut sorted: Vec<&Event> = events.into_iter().collect();
    sorted.sort_by(|a, b| compare(a, b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::event;

    fn ids(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.id.clone().unwrap()).collect()
    }

    #[test]
    fn lookup_returns_events_for_key() {
        let index = DayIndex::build(vec![
            event("a", 3, 8),
            event("b", 3, 9),
            event("c", 3, 8),
        ]);
        let found: Vec<_> = index.lookup(3, 8).iter().map(|e| e.id.as_deref()).collect();
        assert_eq!(found, vec![Some("a"), Some("c")]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.day_count(), 2);
    }

    #[test]
    fn lookup_of_unindexed_day_is_empty() {
        let index = DayIndex::build(vec![event("a", 1, 1)]);
        assert!(index.lookup(2, 30).is_empty());
        assert!(index.lookup(12, 31).is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let index = DayIndex::build(vec![event("a", 5, 5), event("a", 5, 5)]);
        assert_eq!(index.lookup(5, 5).len(), 2);
    }

    #[test]
    fn empty_index() {
        let index = DayIndex::build(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.day_count(), 0);
    }

    #[test]
    fn visible_skips_unverified() {
        let mut hidden = event("hidden", 4, 1);
        hidden.verified = false;
        let index = DayIndex::build(vec![hidden.clone(), event("shown", 4, 1)]);
        let shown: Vec<_> = index.visible(4, 1).map(|e| e.id.as_deref()).collect();
        assert_eq!(shown, vec![Some("shown")]);
        assert!(index.has_visible(4, 1));

        let only_hidden = DayIndex::build(vec![hidden]);
        assert_eq!(only_hidden.lookup(4, 1).len(), 1);
        assert!(!only_hidden.has_visible(4, 1));
    }

    #[test]
    fn scope_priority_values() {
        assert_eq!(scope_priority("ua"), 0);
        assert_eq!(scope_priority("tr"), 1);
        assert_eq!(scope_priority("global"), 2);
        assert_eq!(scope_priority("jp"), 2);
        assert_eq!(scope_priority(""), 2);
    }

    #[test]
    fn order_by_scope_then_type() {
        let mut g = event("g", 1, 1);
        g.scope = "global".into();
        g.kind = "a".into();
        let mut t = event("t", 1, 1);
        t.scope = "tr".into();
        let mut u2 = event("u2", 1, 1);
        u2.scope = "ua".into();
        u2.kind = "religious".into();
        let mut u1 = event("u1", 1, 1);
        u1.scope = "ua".into();
        u1.kind = "historical".into();

        let events = [g, t, u2, u1];
        assert_eq!(ids(&order(&events)), vec!["u1", "u2", "t", "g"]);
    }

    #[test]
    fn empty_type_sorts_first() {
        let mut a = event("a", 1, 1);
        a.kind = "holiday".into();
        let mut b = event("b", 1, 1);
        b.kind = String::new();
        let events = [a, b];
        assert_eq!(ids(&order(&events)), vec!["b", "a"]);
    }

    #[test]
    fn order_is_stable_for_equal_keys() {
        let events: Vec<Event> = (0..6).map(|i| event(&format!("e{i}"), 1, 1)).collect();
        assert_eq!(
            ids(&order(&events)),
            vec!["e0", "e1", "e2", "e3", "e4", "e5"]
        );
    }

    #[test]
    fn order_is_idempotent() {
        let mut events = Vec::new();
        for (i, scope) in ["jp", "ua", "tr", "ua", "global", "tr"].iter().enumerate() {
            let mut e = event(&format!("e{i}"), 1, 1);
            e.scope = scope.to_string();
            e.kind = if i % 2 == 0 { "b" } else { "a" }.to_string();
            events.push(e);
        }
        let once = order(&events);
        let twice = order(once.iter().copied());
        assert_eq!(ids(&once), ids(&twice));
    }
}
