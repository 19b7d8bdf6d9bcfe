use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn sym(n: u32) -> SymbolId {
    SymbolId::new(n)
}

#[test]
fn verdict_display() {
    assert_eq!(WrapVerdict::Wrapped.to_string(), "wrapped");
    assert_eq!(WrapVerdict::Naked.to_string(), "naked");
    assert_eq!(WrapVerdict::from_wrapped(true), WrapVerdict::Wrapped);
}

#[test]
fn record_is_append_only() {
    let mut table = FactTable::new();
    table.record(sym(1), WrapVerdict::Wrapped).unwrap();
    assert_eq!(
        table.record(sym(1), WrapVerdict::Naked),
        Err(FactError::AlreadyRecorded {
            symbol: sym(1),
            existing: WrapVerdict::Wrapped
        })
    );
    assert_eq!(table.verdict(sym(1)), Some(WrapVerdict::Wrapped));
    assert_eq!(table.verdict(sym(2)), None);
}

#[test]
fn entries_are_sorted() {
    let mut table = FactTable::new();
    table.record(sym(5), WrapVerdict::Naked).unwrap();
    table.record(sym(2), WrapVerdict::Wrapped).unwrap();
    assert_eq!(
        table.entries(),
        vec![(sym(2), WrapVerdict::Wrapped), (sym(5), WrapVerdict::Naked)]
    );
}

#[test]
fn layered_reads_through_and_refuses_overwrite() {
    let mut base = FactTable::new();
    base.record(sym(1), WrapVerdict::Wrapped).unwrap();

    let mut layer = LayeredFacts::new(&base);
    assert_eq!(layer.verdict(sym(1)), Some(WrapVerdict::Wrapped));
    assert!(layer.record(sym(1), WrapVerdict::Naked).is_err());
    layer.record(sym(2), WrapVerdict::Naked).unwrap();
    assert_eq!(layer.verdict(sym(2)), Some(WrapVerdict::Naked));

    let local = layer.into_local();
    assert_eq!(local.len(), 1);
    base.merge(local).unwrap();
    assert_eq!(base.verdict(sym(2)), Some(WrapVerdict::Naked));
}

#[test]
fn merge_reports_first_conflict_but_keeps_others() {
    let mut base = FactTable::new();
    base.record(sym(3), WrapVerdict::Wrapped).unwrap();
    let mut other = FactTable::new();
    other.record(sym(3), WrapVerdict::Naked).unwrap();
    other.record(sym(4), WrapVerdict::Wrapped).unwrap();

    let err = base.merge(other).unwrap_err();
    assert_eq!(
        err,
        FactError::AlreadyRecorded {
            symbol: sym(3),
            existing: WrapVerdict::Wrapped
        }
    );
    assert_eq!(base.verdict(sym(3)), Some(WrapVerdict::Wrapped));
    assert_eq!(base.verdict(sym(4)), Some(WrapVerdict::Wrapped));
}

fn verdict_strategy() -> impl Strategy<Value = WrapVerdict> {
    prop_oneof![Just(WrapVerdict::Wrapped), Just(WrapVerdict::Naked)]
}

proptest! {
    #[test]
    fn and_is_naked_iff_any_naked(verdicts in proptest::collection::vec(verdict_strategy(), 0..16)) {
        let folded = verdicts.iter().fold(WrapVerdict::Wrapped, |acc, v| acc.and(*v));
        let any_naked = verdicts.contains(&WrapVerdict::Naked);
        prop_assert_eq!(folded.is_wrapped(), !any_naked);
    }
}
