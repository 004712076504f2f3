use scribble_system::{Operation, OperationLog, Point, Roster, StrokeData, User, PALETTE};

fn stroke_by(user: &User, tag: f32) -> Operation {
    Operation::Stroke {
        user: user.clone(),
        data: StrokeData {
            color: user.color,
            width: 4.0,
            points: vec![Point::new(tag, 0.0), Point::new(tag, 10.0)],
        },
    }
}

fn authors(operations: &[Operation]) -> Vec<u16> {
    operations.iter().map(|op| op.user().id).collect()
}

#[test]
fn shared_canvas_walkthrough() {
    let mut roster = Roster::new();
    let mut log = OperationLog::new();

    // Two users join; the first two palette colors go out in order.
    let a = roster.register();
    let b = roster.register();
    assert_eq!(a.color.to_hex(), "#FF0000");
    assert_eq!(b.color.to_hex(), "#0000FF");

    // Each draws one stroke.
    log.commit(stroke_by(&a, 1.0));
    log.commit(stroke_by(&b, 2.0));
    assert_eq!(authors(&log.snapshot()), vec![a.id, b.id]);

    // The first user undoes: the second user's stroke disappears, because
    // undo is global and takes the newest operation.
    log.undo().expect("must undo");
    assert_eq!(authors(&log.snapshot()), vec![a.id]);

    // A third user joins mid-session and replays exactly the applied
    // history, never the undone stroke.
    let c = roster.register();
    assert_eq!(roster.len(), 3);
    assert_eq!(authors(&log.snapshot()), vec![a.id]);

    // The second user redoes; their stroke comes back in its original
    // position in the order.
    log.redo().expect("must redo");
    assert_eq!(authors(&log.snapshot()), vec![a.id, b.id]);

    // The departed stay attributed: users leave, the log keeps their marks.
    roster.unregister(&a.id).expect("must unregister");
    roster.unregister(&b.id).expect("must unregister");
    assert_eq!(roster.list().to_vec(), vec![c]);
    assert_eq!(authors(&log.snapshot()), vec![a.id, b.id]);
}

#[test]
fn no_committed_operation_is_duplicated_or_lost() {
    let mut roster = Roster::new();
    let mut log = OperationLog::new();
    let a = roster.register();
    let b = roster.register();

    let committed = vec![
        stroke_by(&a, 1.0),
        stroke_by(&b, 2.0),
        stroke_by(&a, 3.0),
        stroke_by(&b, 4.0),
    ];
    for operation in &committed {
        log.commit(operation.clone());
    }

    log.undo().expect("must undo");
    log.undo().expect("must undo");
    log.redo().expect("must redo");
    log.undo().expect("must undo");

    // history ++ reverse(redo) must be exactly the committed sequence.
    let mut accounted = log.snapshot();
    let mut undone = Vec::new();
    while let Some(operation) = log.redo() {
        undone.push(operation.clone());
    }
    accounted.extend(undone);
    assert_eq!(accounted, committed);
}

#[test]
fn a_commit_after_undo_forks_the_history() {
    let mut roster = Roster::new();
    let mut log = OperationLog::new();
    let a = roster.register();
    let b = roster.register();

    log.commit(stroke_by(&a, 1.0));
    log.commit(stroke_by(&b, 2.0));
    log.undo().expect("must undo");

    // A fresh commit discards the undone stroke for good.
    log.commit(stroke_by(&a, 3.0));
    assert!(log.redo().is_none());
    assert_eq!(log.snapshot(), vec![stroke_by(&a, 1.0), stroke_by(&a, 3.0)]);
}

#[test]
fn palette_allocation_outlives_any_roster_churn() {
    let mut roster = Roster::new();

    let mut seen = Vec::new();
    for _ in 0..PALETTE.len() {
        let user = roster.register();
        seen.push(user.color);
        roster.unregister(&user.id).expect("must unregister");
    }

    assert_eq!(seen, PALETTE.to_vec());
    assert!(roster.is_empty());
}
