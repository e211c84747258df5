// Integration tests for the draft core.
//
// These drive the public API end-to-end: creation through the service,
// full round-robin drafts, the completion boundary, and concurrent picks
// against a shared registry.

use std::sync::{Arc, Barrier};
use std::thread;

use draftroom_core::{
    CreateOutcome, Draft, DraftError, DraftService, DraftStatus, ErrorKind, NewDraft, ViewerRole,
};

// ===========================================================================
// Test helpers
// ===========================================================================

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn numbered(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{prefix}{i}")).collect()
}

fn create(service: &DraftService, id: &str, options: Vec<String>, drafters: Vec<String>, rounds: u32) -> Draft {
    let outcome = service
        .create_draft(NewDraft {
            id: id.to_string(),
            options,
            drafters,
            rounds_per_drafter: rounds,
        })
        .unwrap();
    match outcome {
        CreateOutcome::Created(draft) => draft,
        CreateOutcome::AlreadyExists => panic!("draft '{id}' already existed"),
    }
}

/// Check every structural invariant a draft must satisfy after any mutation.
fn assert_invariants(draft: &Draft, original_options: &[String]) {
    let drafters = draft.drafters();
    assert!(!drafters.is_empty());
    assert!(drafters.iter().any(|d| d == draft.current_drafter()));
    assert_eq!(draft.picks_so_far().len(), draft.current_round() - 1);

    for pick in draft.picks_so_far() {
        assert!(!draft.options().contains(pick), "{pick} picked but still available");
    }
    assert_eq!(
        draft.options().len() + draft.picks_so_far().len(),
        original_options.len()
    );

    for (k, record) in draft.pick_history().iter().enumerate() {
        assert_eq!(record.drafter, drafters[k % drafters.len()]);
    }
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn candy_draft_scenario() {
    let service = DraftService::new();
    let options = strings(&["snickers", "hershey's", "almond joy"]);
    let draft = create(
        &service,
        "candyDraft",
        options.clone(),
        strings(&["bobby", "timmy", "jimmy"]),
        1,
    );
    assert_eq!(draft.total_rounds(), 3);
    assert_eq!(draft.current_drafter(), "bobby");
    assert_eq!(draft.current_round(), 1);

    let draft = service.make_pick("candyDraft", "bobby", "hershey's").unwrap();
    assert_eq!(draft.options(), strings(&["snickers", "almond joy"]));
    assert_eq!(draft.current_round(), 2);
    assert_eq!(draft.current_drafter(), "timmy");
    assert_invariants(&draft, &options);

    let draft = service.make_pick("candyDraft", "timmy", "snickers").unwrap();
    assert_eq!(draft.current_round(), 3);
    assert_eq!(draft.current_drafter(), "jimmy");

    let draft = service.make_pick("candyDraft", "jimmy", "almond joy").unwrap();
    assert_eq!(draft.current_round(), 4);
    assert_eq!(draft.current_drafter(), "bobby");
    assert!(draft.options().is_empty());
    assert_eq!(draft.status(), DraftStatus::Complete);
    assert_eq!(
        draft.picks_so_far(),
        strings(&["hershey's", "snickers", "almond joy"])
    );
    assert_invariants(&draft, &options);

    let err = service
        .make_pick("candyDraft", "jimmy", "almond joy")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TurnViolation);
    assert_eq!(service.retrieve_draft("candyDraft").unwrap(), draft);
}

#[test]
fn fresh_id_becomes_unavailable_after_create() {
    let service = DraftService::new();
    assert!(service.check_id_available("freshId"));
    create(&service, "freshId", strings(&["a"]), strings(&["x"]), 1);
    assert!(!service.check_id_available("freshId"));
}

#[test]
fn reads_never_mutate_registry() {
    let service = DraftService::new();
    create(&service, "readOnly", strings(&["a", "b"]), strings(&["x", "y"]), 1);
    let before = service.retrieve_draft("readOnly").unwrap();

    for _ in 0..5 {
        service.retrieve_draft("readOnly").unwrap();
        service.check_id_available("readOnly");
        service.check_id_available("other");
        service.view_draft("readOnly", "x").unwrap();
    }

    assert_eq!(service.retrieve_draft("readOnly").unwrap(), before);
    assert_eq!(service.registry().len(), 1);
    assert!(service.check_id_available("other"));
}

// ===========================================================================
// Round-robin properties
// ===========================================================================

#[test]
fn turn_order_wraps_across_cycles() {
    for n in 1..=5usize {
        for rounds in 1..=3u32 {
            let service = DraftService::new();
            let drafters = numbered("drafter", n);
            let options = numbered("option", n * rounds as usize + 2);
            create(&service, "rr", options.clone(), drafters.clone(), rounds);

            let total = n * rounds as usize;
            for k in 0..total {
                let draft = service.retrieve_draft("rr").unwrap();
                let expected = &drafters[k % n];
                assert_eq!(draft.current_drafter(), expected, "n={n} rounds={rounds} k={k}");

                let selection = draft.options()[0].clone();
                let after = service.make_pick("rr", expected, &selection).unwrap();
                assert_invariants(&after, &options);
            }

            let done = service.retrieve_draft("rr").unwrap();
            assert!(done.is_complete());
            assert_eq!(done.current_round(), total + 1);
            // Two spare options were never drafted.
            assert_eq!(done.options().len(), 2);

            let err = service
                .make_pick("rr", done.current_drafter(), &done.options()[0])
                .unwrap_err();
            assert_eq!(err, DraftError::DraftAlreadyComplete { total_rounds: total });
        }
    }
}

#[test]
fn pool_empties_only_when_rounds_use_every_option() {
    let service = DraftService::new();
    let options = numbered("o", 4);
    create(&service, "exact", options, strings(&["x", "y"]), 2);
    for (drafter, pick) in [("x", "o1"), ("y", "o2"), ("x", "o3"), ("y", "o4")] {
        service.make_pick("exact", drafter, pick).unwrap();
    }
    let draft = service.retrieve_draft("exact").unwrap();
    assert!(draft.is_complete());
    assert!(draft.options().is_empty());
}

#[test]
fn every_non_current_drafter_is_rejected() {
    let service = DraftService::new();
    let drafters = numbered("d", 4);
    create(&service, "guard", numbered("o", 8), drafters.clone(), 2);
    let before = service.retrieve_draft("guard").unwrap();

    for outsider in drafters.iter().skip(1).chain(["intruder".to_string()].iter()) {
        let err = service.make_pick("guard", outsider, "o1").unwrap_err();
        assert!(matches!(err, DraftError::NotYourTurn { .. }));
    }
    assert_eq!(service.retrieve_draft("guard").unwrap(), before);
}

#[test]
fn creation_errors_are_classified() {
    let service = DraftService::new();
    let err = service
        .create_draft(NewDraft {
            id: "noDrafters".into(),
            options: strings(&["a", "b"]),
            drafters: vec![],
            rounds_per_drafter: 1,
        })
        .unwrap_err();
    assert_eq!(err, DraftError::InvalidDrafters);
    assert_eq!(err.kind(), ErrorKind::Invariant);

    for (options, drafters, rounds) in [(1, 1, 2), (2, 3, 1), (0, 1, 1), (5, 2, 3)] {
        let err = service
            .create_draft(NewDraft {
                id: "short".into(),
                options: numbered("o", options),
                drafters: numbered("d", drafters),
                rounds_per_drafter: rounds,
            })
            .unwrap_err();
        assert!(
            matches!(err, DraftError::InsufficientOptions { .. }),
            "options={options} drafters={drafters} rounds={rounds}: {err}"
        );
    }
    assert!(service.registry().is_empty());
}

#[test]
fn viewer_roles_follow_the_draft() {
    let service = DraftService::new();
    create(&service, "roles", strings(&["a", "b"]), strings(&["x", "y"]), 1);

    assert_eq!(service.view_draft("roles", "x").unwrap().role, ViewerRole::OnTheClock);
    service.make_pick("roles", "x", "a").unwrap();
    assert_eq!(
        service.view_draft("roles", "x").unwrap().role,
        ViewerRole::Waiting { current: "y".into() }
    );
    service.make_pick("roles", "y", "b").unwrap();
    assert_eq!(service.view_draft("roles", "z").unwrap().role, ViewerRole::Complete);
}

// ===========================================================================
// Concurrency
// ===========================================================================

#[test]
fn concurrent_picks_for_same_turn_admit_exactly_one() {
    let service = Arc::new(DraftService::new());
    create(&service, "race", numbered("o", 16), strings(&["x", "y"]), 8);

    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                service.make_pick("race", "x", &format!("o{}", i + 1))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let accepted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 1);
    for err in results.into_iter().filter_map(Result::err) {
        assert!(matches!(err, DraftError::NotYourTurn { .. }));
    }

    let draft = service.retrieve_draft("race").unwrap();
    assert_eq!(draft.picks_so_far().len(), 1);
    assert_eq!(draft.current_drafter(), "y");
}

#[test]
fn drafts_on_different_ids_progress_independently() {
    let service = Arc::new(DraftService::new());
    let ids: Vec<String> = (0..6).map(|i| format!("parallel{i}")).collect();
    for id in &ids {
        create(&service, id, numbered("o", 9), strings(&["a", "b", "c"]), 3);
    }

    let handles: Vec<_> = ids
        .iter()
        .cloned()
        .map(|id| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let drafters = ["a", "b", "c"];
                for k in 0..9 {
                    service
                        .make_pick(&id, drafters[k % 3], &format!("o{}", k + 1))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for id in &ids {
        let draft = service.retrieve_draft(id).unwrap();
        assert!(draft.is_complete());
        assert_eq!(draft.picks_so_far(), numbered("o", 9));
    }
}
