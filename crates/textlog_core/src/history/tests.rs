use super::*;

fn history_with(text: &str) -> History {
    let mut history = History::new();
    history.insert(text, None).expect("seed insert");
    history
}

fn assert_unchanged(history: &History, text: &str, version: u64, actions: usize) {
    assert_eq!(history.text(), text);
    assert_eq!(history.version(), version);
    assert_eq!(
        history
            .get_actions_unmerged(None, None)
            .expect("full range")
            .len(),
        actions
    );
}

#[test]
fn new_history_is_empty_at_version_zero() {
    let history = History::new();
    assert_eq!(history.text(), "");
    assert_eq!(history.version(), 0);
    assert!(history.get_actions(None, None).expect("empty").is_empty());
}

#[test]
fn insert_delete_scenario_tracks_text_and_versions() {
    let mut history = History::new();
    assert_eq!(history.insert("123456", None), Ok(1));
    assert_eq!(history.text(), "123456");
    assert_eq!(history.delete(2, 2), Ok(2));
    assert_eq!(history.text(), "1256");
    assert_eq!(history.delete(2, 2), Ok(3));
    assert_eq!(history.text(), "12");
    assert_eq!(history.insert("3", None), Ok(4));
    assert_eq!(history.text(), "123");
}

#[test]
fn replace_overwrites_in_place_and_extends_past_tail() {
    let mut history = history_with("XYZ");
    history.replace("AB", Some(0)).expect("replace fits");
    assert_eq!(history.text(), "ABZ");

    let mut history = history_with("XY");
    history.replace("ABCDE", Some(1)).expect("replace extends");
    assert_eq!(history.text(), "XABCDE");

    let mut history = history_with("XY");
    history.replace("!", None).expect("replace at end appends");
    assert_eq!(history.text(), "XY!");
}

#[test]
fn insert_position_bounds_matrix() {
    for pos in 0..=3 {
        let mut history = history_with("abc");
        assert_eq!(history.insert("xy", Some(pos)), Ok(2), "pos: {}", pos);
        assert_eq!(history.text().chars().count(), 5);
    }

    let mut history = history_with("abc");
    assert_eq!(
        history.insert("x", Some(4)),
        Err(HistoryError::InvalidPosition { pos: 4, len: 3 })
    );
    assert_unchanged(&history, "abc", 1, 1);
}

#[test]
fn replace_rejects_position_past_end() {
    let mut history = history_with("abc");
    assert_eq!(
        history.replace("x", Some(7)),
        Err(HistoryError::InvalidPosition { pos: 7, len: 3 })
    );
    assert_unchanged(&history, "abc", 1, 1);
}

#[test]
fn delete_requires_enough_tail() {
    let cases = [
        (0, 4, Ok("")),
        (1, 3, Ok("a")),
        (4, 0, Ok("abcd")),
        (2, 3, Err(HistoryError::InsufficientTail {
            pos: 2,
            length: 3,
            available: 2,
        })),
        (4, 1, Err(HistoryError::InsufficientTail {
            pos: 4,
            length: 1,
            available: 0,
        })),
        (5, 0, Err(HistoryError::InvalidPosition { pos: 5, len: 4 })),
    ];

    for (pos, length, expected) in cases {
        let mut history = history_with("abcd");
        let result = history.delete(pos, length);
        match expected {
            Ok(text) => {
                assert_eq!(result, Ok(2), "delete({}, {})", pos, length);
                assert_eq!(history.text(), text);
            }
            Err(err) => {
                assert_eq!(result, Err(err), "delete({}, {})", pos, length);
                assert_unchanged(&history, "abcd", 1, 1);
            }
        }
    }
}

#[test]
fn positions_and_lengths_count_characters() {
    let mut history = history_with("héllo");
    history.delete(1, 1).expect("delete accented char");
    assert_eq!(history.text(), "hllo");
    history.insert("ë", Some(4)).expect("insert at char end");
    assert_eq!(history.text(), "hlloë");
    assert!(history.insert("x", Some(6)).is_err());
}

#[test]
fn actions_are_stamped_with_consecutive_versions() {
    let mut history = History::with_config(HistoryConfig {
        merge_actions: false,
    });
    history.insert("abc", None).expect("insert");
    history.replace("Z", Some(1)).expect("replace");
    history.delete(0, 1).expect("delete");

    let actions = history.get_actions(None, None).expect("full range");
    let versions: Vec<(u64, u64)> = actions
        .iter()
        .map(|action| (action.from_version(), action.to_version()))
        .collect();
    assert_eq!(versions, vec![(0, 1), (1, 2), (2, 3)]);
}

#[test]
fn get_actions_filters_by_from_version() {
    let mut history = History::new();
    history.insert("a", None).expect("v1");
    history.replace("b", Some(0)).expect("v2");
    history.delete(0, 1).expect("v3");

    let middle = history.get_actions(Some(1), Some(2)).expect("slice");
    assert_eq!(middle, vec![Action::from(ReplaceAction::new(0, "b", 1, 2))]);

    let tail = history.get_actions(Some(2), None).expect("tail");
    assert_eq!(tail, vec![Action::from(DeleteAction::new(0, 1, 2, 3))]);

    assert!(history.get_actions(Some(3), Some(3)).expect("empty").is_empty());
}

#[test]
fn get_actions_range_validation_matrix() {
    let mut history = History::new();
    history.insert("ab", None).expect("v1");
    history.insert("cd", None).expect("v2");

    for (from, to) in [
        (Some(2), Some(1)),
        (None, Some(3)),
        (Some(3), None),
        (Some(1), Some(0)),
    ] {
        assert!(
            matches!(
                history.get_actions(from, to),
                Err(HistoryError::InvalidRange { .. })
            ),
            "range: {:?}..{:?}",
            from,
            to
        );
    }
}

#[test]
fn get_actions_up_to_version_zero_is_empty() {
    let mut history = History::new();
    history.insert("ab", None).expect("v1");
    assert!(history.get_actions(None, Some(0)).expect("empty").is_empty());
    assert!(history
        .get_actions(Some(0), Some(0))
        .expect("empty")
        .is_empty());
}

#[test]
fn get_actions_merges_returned_slice_only() {
    let mut history = History::new();
    history.insert("ab", None).expect("v1");
    history.insert("cd", None).expect("v2");
    history.delete(0, 1).expect("v3");
    history.delete(0, 1).expect("v4");

    let merged = history.get_actions(None, None).expect("merged");
    assert_eq!(
        merged,
        vec![
            Action::from(InsertAction::new(0, "abcd", 0, 2)),
            Action::from(DeleteAction::new(0, 2, 2, 4)),
        ]
    );

    assert_eq!(history.text(), "cd");
    assert_eq!(history.version(), 4);
    assert_eq!(
        history.get_actions_unmerged(None, None).expect("raw").len(),
        4
    );
}

#[test]
fn every_version_prefix_replays_to_its_text() {
    let mut history = History::new();
    let mut snapshots = vec![history.text().to_string()];
    let edits: [fn(&mut History) -> Result<u64, HistoryError>; 5] = [
        |h| h.insert("123456", None),
        |h| h.delete(2, 2),
        |h| h.replace("abcdef", Some(1)),
        |h| h.insert("Hello", Some(0)),
        |h| h.delete(3, 4),
    ];
    for edit in edits {
        edit(&mut history).expect("edit");
        snapshots.push(history.text().to_string());
    }

    for (k, snapshot) in snapshots.iter().enumerate() {
        let prefix = history
            .get_actions_unmerged(None, Some(k as u64))
            .expect("prefix");
        assert_eq!(prefix.len(), k);
        assert_eq!(
            &crate::action::replay(&prefix, ""),
            snapshot,
            "version: {}",
            k
        );
    }
}

#[test]
fn raw_action_skips_position_validation() {
    let mut history = History::new();
    history.insert("123", None).expect("v1");

    let raw = Action::from(InsertAction::new(3, "123456", 1, 10));
    assert_eq!(history.apply_raw_action(raw), Ok(10));
    assert_eq!(history.text(), "123123456");
    assert_eq!(history.version(), 10);

    let beyond_end = Action::from(DeleteAction::new(50, 2, 10, 11));
    assert_eq!(history.apply_raw_action(beyond_end), Ok(11));
    assert_eq!(history.text(), "123123456");

    let backwards = Action::from(ReplaceAction::new(0, "x", 11, 11));
    assert_eq!(
        history.apply_raw_action(backwards),
        Err(HistoryError::InvalidVersionRange {
            from_version: 11,
            to_version: 11
        })
    );
    assert_unchanged(&history, "123123456", 11, 3);
}

#[test]
fn histories_are_independent() {
    let mut first = History::new();
    let second = History::new();
    first.insert("only here", None).expect("insert");
    assert_eq!(second.text(), "");
    assert_eq!(second.version(), 0);
}

#[test]
fn raw_action_cannot_rewind_the_version() {
    let mut history = History::new();
    for text in ["a", "b", "c"] {
        history.insert(text, None).expect("insert");
    }

    for stale in [
        Action::from(DeleteAction::new(0, 1, 0, 1)),
        Action::from(InsertAction::new(0, "x", 2, 3)),
    ] {
        assert_eq!(
            history.apply_raw_action(stale.clone()),
            Err(HistoryError::InvalidVersionRange {
                from_version: 3,
                to_version: stale.to_version(),
            })
        );
        assert_unchanged(&history, "abc", 3, 3);
    }

    assert_eq!(history.insert("Z", None), Ok(4));
    let versions: Vec<(u64, u64)> = history
        .get_actions_unmerged(None, None)
        .expect("log")
        .iter()
        .map(|action| (action.from_version(), action.to_version()))
        .collect();
    assert_eq!(versions, vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
}

#[test]
fn exhausted_version_counter_rejects_edits() {
    let mut history = History::new();
    let last = Action::from(InsertAction::new(0, "a", 0, u64::MAX));
    assert_eq!(history.apply_raw_action(last), Ok(u64::MAX));

    let exhausted = Err(HistoryError::InvalidVersionRange {
        from_version: u64::MAX,
        to_version: u64::MAX,
    });
    assert_eq!(history.insert("b", None), exhausted);
    assert_eq!(history.replace("b", Some(0)), exhausted);
    assert_eq!(history.delete(0, 1), exhausted);
    assert_unchanged(&history, "a", u64::MAX, 1);
}
