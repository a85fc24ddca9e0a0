// Property tests: the registry mirrors the logical list, and rewinding a
// step restores the registry exactly

use listanim::config::Config;
use listanim::list::{ListVariant, NodeId};
use listanim::session::Session;
use listanim::visual::layout::ConnectorKind;
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
enum Op {
    InsertHead(i32),
    InsertTail(i32),
    InsertAt(i32, i64),
    DeleteHead,
    DeleteTail,
    DeleteAt(i64),
    Search(i32),
    Traverse,
    Reverse,
    Clear,
}

fn arb_variant() -> impl Strategy<Value = ListVariant> {
    prop_oneof![
        Just(ListVariant::Singly),
        Just(ListVariant::Doubly),
        Just(ListVariant::Circular),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..100i32).prop_map(Op::InsertHead),
        4 => (0..100i32).prop_map(Op::InsertTail),
        3 => (0..100i32, -1..8i64).prop_map(|(v, p)| Op::InsertAt(v, p)),
        2 => Just(Op::DeleteHead),
        2 => Just(Op::DeleteTail),
        2 => (-1..8i64).prop_map(Op::DeleteAt),
        1 => (0..100i32).prop_map(Op::Search),
        1 => Just(Op::Traverse),
        2 => Just(Op::Reverse),
        1 => Just(Op::Clear),
    ]
}

/// Start `op`; rejections are fine, they must simply leave nothing behind
fn apply(session: &mut Session, op: &Op) -> bool {
    let result = match op {
        Op::InsertHead(v) => session.insert_head(&v.to_string()),
        Op::InsertTail(v) => session.insert_tail(&v.to_string()),
        Op::InsertAt(v, p) => session.insert_at(&v.to_string(), &p.to_string()),
        Op::DeleteHead => session.delete_head(),
        Op::DeleteTail => session.delete_tail(),
        Op::DeleteAt(p) => session.delete_at(&p.to_string()),
        Op::Search(v) => session.search(&v.to_string()),
        Op::Traverse => session.traverse(),
        Op::Reverse => session.reverse(),
        Op::Clear => session.clear(),
    };
    result.is_ok()
}

fn assert_mirrors(session: &Session) -> Result<(), TestCaseError> {
    let list = session.list();
    let registry = session.registry();
    prop_assert!(list.validate().is_ok(), "{:?}", list.validate());

    let logical: BTreeSet<NodeId> = list.ids().into_iter().collect();
    let visual: BTreeSet<NodeId> = registry.nodes().iter().map(|n| n.id).collect();
    prop_assert_eq!(&logical, &visual);

    let edges = |kind: ConnectorKind| -> BTreeSet<(NodeId, NodeId)> {
        registry
            .connectors()
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| (c.from, c.to))
            .collect()
    };

    let mut forward = BTreeSet::new();
    let mut backward = BTreeSet::new();
    for id in list.ids() {
        if let Some(next) = list.next_of(id) {
            let wraps = Some(id) == list.tail() && Some(next) == list.head();
            if !wraps {
                forward.insert((id, next));
            }
        }
        if let Some(prev) = list.prev_of(id) {
            backward.insert((id, prev));
        }
    }
    prop_assert_eq!(edges(ConnectorKind::Next), forward);
    prop_assert_eq!(edges(ConnectorKind::Prev), backward);

    let expected_wraps = usize::from(list.variant() == ListVariant::Circular && !list.is_empty());
    prop_assert_eq!(edges(ConnectorKind::Wrap).len(), expected_wraps);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// After each operation plays to the end, the registry holds exactly the
    /// logical nodes and one connector per logical link
    #[test]
    fn registry_mirrors_list(
        variant in arb_variant(),
        ops in prop::collection::vec(arb_op(), 1..24),
    ) {
        let mut session = Session::new(Config { variant, ..Config::default() });
        for op in &ops {
            apply(&mut session, op);
            session.run_to_end().ok();
            assert_mirrors(&session)?;
            prop_assert!(!session.is_busy());
        }
    }

    /// Undoing any step restores the registry captured right before it ran
    #[test]
    fn step_backward_restores_exactly(
        variant in arb_variant(),
        setup in prop::collection::vec(0..100i32, 0..5),
        op in arb_op(),
    ) {
        let mut session = Session::new(Config { variant, ..Config::default() });
        for value in &setup {
            session.insert_tail(&value.to_string()).unwrap();
            session.run_to_end().unwrap();
        }
        prop_assume!(apply(&mut session, &op));
        session.pause();

        while !session.player().at_end() {
            let before = session.registry().snapshot();
            session.step_forward().unwrap();
            session.step_backward().unwrap();
            prop_assert_eq!(session.registry().snapshot(), before);
            session.step_forward().unwrap();
        }
    }

    /// Two reversals give back the original order on non-circular lists
    #[test]
    fn reverse_twice_is_identity(
        doubly in any::<bool>(),
        values in prop::collection::vec(0..100i32, 2..10),
    ) {
        let variant = if doubly { ListVariant::Doubly } else { ListVariant::Singly };
        let mut session = Session::new(Config { variant, ..Config::default() });
        for value in &values {
            session.insert_tail(&value.to_string()).unwrap();
            session.run_to_end().unwrap();
        }
        let head = session.list().head();
        let tail = session.list().tail();

        for _ in 0..2 {
            session.reverse().unwrap();
            session.run_to_end().unwrap();
        }
        prop_assert_eq!(session.list().values(), values);
        prop_assert_eq!(session.list().head(), head);
        prop_assert_eq!(session.list().tail(), tail);
    }
}
