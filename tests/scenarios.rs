// Integration tests for list operations played through a session

use listanim::config::Config;
use listanim::driver::{Outcome, Rejection};
use listanim::list::{ListVariant, NodeId};
use listanim::player::PlayerState;
use listanim::session::Session;
use listanim::visual::layout::ConnectorKind;
use listanim::visual::Highlight;

fn session(variant: ListVariant) -> Session {
    Session::new(Config {
        variant,
        ..Config::default()
    })
}

/// Run every operation to completion, one after the other
fn build(variant: ListVariant, values: &[i32]) -> Session {
    let mut session = session(variant);
    for value in values {
        session
            .insert_tail(&value.to_string())
            .expect("insert should be accepted");
        session.run_to_end().expect("insert should play");
    }
    session
}

fn id_of(session: &Session, value: i32) -> NodeId {
    let list = session.list();
    list.ids()
        .into_iter()
        .find(|id| list.value_of(*id) == Some(value))
        .expect("value should be in the list")
}

fn edges(session: &Session) -> Vec<(NodeId, NodeId, ConnectorKind)> {
    let mut edges: Vec<_> = session
        .registry()
        .connectors()
        .iter()
        .map(|c| (c.from, c.to, c.kind))
        .collect();
    edges.sort();
    edges
}

#[test]
fn test_insert_tail_into_empty_singly() {
    let session = build(ListVariant::Singly, &[5]);

    let list = session.list();
    assert_eq!(list.len(), 1);
    assert_eq!(list.head(), list.tail());

    let nodes = session.registry().nodes();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].value, 5);
    assert!(session.registry().connectors().is_empty());
    assert_eq!(session.player().state(), PlayerState::Finished);
}

#[test]
fn test_delete_middle_singly() {
    let mut session = build(ListVariant::Singly, &[10, 20, 30]);
    let removed = id_of(&session, 20);

    session.delete_at("1").unwrap();
    session.run_to_end().unwrap();

    assert_eq!(session.list().len(), 2);
    assert_eq!(session.list().values(), vec![10, 30]);
    assert!(!session.registry().contains(removed));
    assert_eq!(
        edges(&session),
        vec![(id_of(&session, 10), id_of(&session, 30), ConnectorKind::Next)]
    );
}

#[test]
fn test_insert_head_circular_moves_wrap() {
    let mut session = build(ListVariant::Circular, &[1, 2, 3]);

    session.insert_head("0").unwrap();
    let script_wraps = session
        .player()
        .steps()
        .iter()
        .filter(|s| s.description().contains("circular") || s.description().contains("Tail ->"))
        .count();
    assert_eq!(script_wraps, 2, "one removal step and one re-add step");
    session.run_to_end().unwrap();

    let wraps: Vec<_> = session
        .registry()
        .connectors()
        .iter()
        .filter(|c| c.kind == ConnectorKind::Wrap)
        .collect();
    assert_eq!(wraps.len(), 1);
    assert_eq!(wraps[0].from, id_of(&session, 3));
    assert_eq!(wraps[0].to, id_of(&session, 0));
    assert_eq!(session.list().values(), vec![0, 1, 2, 3]);
    assert_eq!(session.list().head(), Some(id_of(&session, 0)));
}

#[test]
fn test_reverse_two_node_doubly() {
    let mut session = build(ListVariant::Doubly, &[1, 2]);
    let one = id_of(&session, 1);
    let two = id_of(&session, 2);

    session.reverse().unwrap();
    session.run_to_end().unwrap();

    let list = session.list();
    assert_eq!(list.head(), Some(two));
    assert_eq!(list.tail(), Some(one));
    assert_eq!(list.prev_of(two), None);
    assert_eq!(list.next_of(one), None);
    assert_eq!(list.prev_of(one), Some(two));
    assert_eq!(list.next_of(two), Some(one));
    assert_eq!(
        edges(&session),
        vec![
            (one, two, ConnectorKind::Prev),
            (two, one, ConnectorKind::Next),
        ]
    );
}

#[test]
fn test_search_missing_value() {
    let mut session = build(ListVariant::Singly, &[1, 2, 3]);

    let outcome = session.search("99").unwrap();
    assert_eq!(outcome, Outcome::NotFound);
    session.run_to_end().unwrap();

    assert!(session
        .registry()
        .nodes()
        .iter()
        .all(|n| n.highlight != Highlight::Found));
    assert_eq!(session.list().values(), vec![1, 2, 3]);

    let steps = session.player().steps();
    assert_eq!(
        steps[steps.len() - 2].description(),
        "Value not found in list."
    );
}

#[test]
fn test_circular_tail_links_to_head_after_every_edit() {
    let mut session = build(ListVariant::Circular, &[1, 2, 3, 4]);
    let check = |session: &mut Session| {
        session.run_to_end().unwrap();
        let list = session.list();
        if let Some(tail) = list.tail() {
            assert_eq!(list.next_of(tail), list.head());
        }
        list.validate().unwrap();
    };

    session.insert_at("9", "2").unwrap();
    check(&mut session);
    session.delete_tail().unwrap();
    check(&mut session);
    session.delete_head().unwrap();
    check(&mut session);
    session.delete_at("1").unwrap();
    check(&mut session);
    session.reverse().unwrap();
    check(&mut session);
}

#[test]
fn test_rejections_do_not_enqueue() {
    let mut session = build(ListVariant::Singly, &[1]);
    let steps_before = session.player().len();

    assert_eq!(
        session.insert_at("5", "7"),
        Err(Rejection::PositionOutOfRange {
            position: 7,
            max: 1
        })
    );
    assert_eq!(
        session.insert_at("abc", "0"),
        Err(Rejection::InvalidNumber {
            input: "abc".to_string()
        })
    );
    assert_eq!(session.reverse(), Err(Rejection::TooSmallToReverse));
    assert_eq!(
        session.search(""),
        Err(Rejection::MissingValue { field: "value" })
    );

    assert_eq!(session.player().len(), steps_before);
    assert!(!session.is_busy());
}

#[test]
fn test_rewind_replays_with_same_ids() {
    let mut session = build(ListVariant::Doubly, &[1, 2]);
    session.insert_at("7", "1").unwrap();
    session.run_to_end().unwrap();
    let finished = edges(&session);

    while session.step_backward().is_ok() {}
    assert_eq!(session.player().state(), PlayerState::Populated);
    assert_eq!(session.registry().node_count(), 2);

    session.run_to_end().unwrap();
    assert_eq!(edges(&session), finished);
    assert_eq!(session.player().state(), PlayerState::Finished);
}

#[test]
fn test_traverse_circular_ends_back_at_head() {
    let mut session = build(ListVariant::Circular, &[4, 5]);
    session.traverse().unwrap();
    session.run_to_end().unwrap();

    let steps = session.player().steps();
    assert_eq!(steps[steps.len() - 2].description(), "4 -> 5 -> (head)");
}

/// Step the launched operation one step at a time, calling `check` with the
/// index of each step after it ran
fn step_through(session: &mut Session, mut check: impl FnMut(&Session, usize)) {
    while !session.player().at_end() {
        let index = session.step_forward().expect("step should run");
        check(session, index);
    }
}

fn wrap_count(session: &Session) -> usize {
    session
        .registry()
        .connectors()
        .iter()
        .filter(|c| c.kind == ConnectorKind::Wrap)
        .count()
}

/// An operation started on a session holding `len` nodes
type SessionOp = fn(&mut Session, usize) -> Result<Outcome, Rejection>;

#[test]
fn test_circular_operations_never_show_two_wraps() {
    let operations: [(&str, SessionOp); 7] = [
        ("insert head", |s, _| s.insert_head("9")),
        ("insert tail", |s, _| s.insert_tail("9")),
        ("insert at", |s, len| s.insert_at("9", &(len / 2).to_string())),
        ("delete head", |s, _| s.delete_head()),
        ("delete tail", |s, _| s.delete_tail()),
        ("delete at", |s, len| s.delete_at(&(len / 2).to_string())),
        ("reverse", |s, _| s.reverse()),
    ];

    for len in 0..=4 {
        let values: Vec<i32> = (1..=len as i32).collect();
        for (name, operation) in operations {
            let mut session = build(ListVariant::Circular, &values);
            if operation(&mut session, len).is_err() {
                continue;
            }
            step_through(&mut session, |session, index| {
                assert!(
                    wrap_count(session) <= 1,
                    "{} on {} nodes: step {} left {} wraps",
                    name,
                    len,
                    index,
                    wrap_count(session)
                );
            });
            let expected = usize::from(!session.list().is_empty());
            assert_eq!(wrap_count(&session), expected, "{} on {} nodes", name, len);
        }
    }
}

#[test]
fn test_doubly_forward_link_precedes_backward_link() {
    let operations: [(&str, SessionOp); 4] = [
        ("insert head", |s, _| s.insert_head("9")),
        ("insert tail", |s, _| s.insert_tail("9")),
        ("insert at", |s, len| s.insert_at("9", &(len / 2).to_string())),
        ("delete at", |s, len| s.delete_at(&(len / 2).to_string())),
    ];

    for len in 0..=4 {
        let values: Vec<i32> = (1..=len as i32).collect();
        for (name, operation) in operations {
            let mut session = build(ListVariant::Doubly, &values);
            if operation(&mut session, len).is_err() {
                continue;
            }

            // Step at which each edge first appeared
            let mut added: Vec<((NodeId, NodeId, ConnectorKind), usize)> = Vec::new();
            let mut previous = edges(&session);
            step_through(&mut session, |session, index| {
                let current = edges(session);
                for edge in &current {
                    if !previous.contains(edge) {
                        added.push((*edge, index));
                    }
                }
                previous = current;
            });

            let mut pairs = 0;
            for &((from, to, kind), prev_step) in &added {
                if kind != ConnectorKind::Prev {
                    continue;
                }
                let forward = added
                    .iter()
                    .find(|((f, t, k), _)| *f == to && *t == from && *k == ConnectorKind::Next);
                if let Some(&(_, next_step)) = forward {
                    pairs += 1;
                    assert!(
                        next_step < prev_step,
                        "{} on {} nodes: next link at step {} but prev link at step {}",
                        name,
                        len,
                        next_step,
                        prev_step
                    );
                }
            }

            let inserting = name.starts_with("insert");
            if inserting && len > 0 {
                assert!(pairs > 0, "{} on {} nodes linked nothing both ways", name, len);
            }
            if name == "delete at" && len >= 3 {
                assert_eq!(pairs, 1, "{} on {} nodes", name, len);
            }
        }
    }
}

#[test]
fn test_wrap_removal_shows_processing_code() {
    let mut session = build(ListVariant::Circular, &[1, 2]);
    session.insert_tail("3").unwrap();

    let mut seen = false;
    step_through(&mut session, |session, _| {
        if session.player().description() == "Removing old circular link" {
            assert_eq!(session.player().code(), "// Processing...");
            seen = true;
        }
    });
    assert!(seen);
}

#[test]
fn test_doubly_pointer_swap_shows_processing_code() {
    let mut session = build(ListVariant::Doubly, &[1, 2, 3]);
    session.reverse().unwrap();

    let mut swaps = 0;
    step_through(&mut session, |session, _| {
        if session.player().description() == "Pointers swapped" {
            assert_eq!(session.player().code(), "// Processing...");
            swaps += 1;
        }
    });
    assert_eq!(swaps, 3);
}
