use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use tagpick_core::scanner::WalkRules;
use tagpick_core::{
    Error, FilterQuery, Mode, Origin, SearchRequest, SearchSession, SidecarTagProvider, Volume,
};

fn write_tagged(path: &Path, tags: Option<&str>) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"video").unwrap();
    if let Some(tags) = tags {
        fs::write(SidecarTagProvider::sidecar_path(path), tags).unwrap();
    }
}

fn rules() -> WalkRules {
    WalkRules::new(&[".mp4".to_string(), ".avi".to_string(), ".wmv".to_string()])
        .with_reserved_dirs(&["$RECYCLE.BIN".to_string()])
}

/// Layout:
///   os/
///     a.mp4          tags "x"
///     b.avi          tags "y;x"
///     readme.txt
fn create_os_volume(root: &Path) {
    write_tagged(&root.join("a.mp4"), Some("x"));
    write_tagged(&root.join("b.avi"), Some("y;x"));
    fs::write(root.join("readme.txt"), "not a video").unwrap();
}

fn session_for(volumes: Vec<Volume>, seed: u64) -> SearchSession {
    SearchSession::new(volumes, rules(), SidecarTagProvider::new())
        .with_rng(StdRng::seed_from_u64(seed))
}

fn result_paths(session: &mut SearchSession, request: &SearchRequest) -> Vec<PathBuf> {
    let outcome = session.search(request).unwrap();
    outcome
        .result
        .map(|r| r.files.into_iter().map(|f| f.path).collect())
        .unwrap_or_default()
}

#[test]
fn test_or_search_returns_all_matches_when_sample_is_larger() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("os");
    create_os_volume(&root);
    let mut session = session_for(vec![Volume::new(&root, "OS").with_selected(true)], 1);

    let request = SearchRequest::new("x").with_mode(Mode::Or).with_sample_size("5");
    let outcome = session.search(&request).unwrap();
    let result = outcome.result.expect("expected matches");

    let paths: Vec<PathBuf> = result.files.iter().map(|f| f.path.clone()).collect();
    assert_eq!(paths, vec![root.join("a.mp4"), root.join("b.avi")]);
    assert_eq!(result.filter, "x");
    assert_eq!(result.mode, Mode::Or);
    assert!(matches!(result.origin, Origin::Volumes(ref ids) if ids.len() == 1));
    assert!(outcome.warnings.is_empty());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_and_search_requires_every_tag() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("os");
    create_os_volume(&root);
    let mut session = session_for(vec![Volume::new(&root, "OS").with_selected(true)], 2);

    let request = SearchRequest::new("y; x").with_mode(Mode::And).with_sample_size("5");
    assert_eq!(result_paths(&mut session, &request), vec![root.join("b.avi")]);
}

#[test]
fn test_vacuous_filter_includes_untagged_files() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("os");
    create_os_volume(&root);
    write_tagged(&root.join("clips").join("c.wmv"), None);
    let mut session = session_for(vec![Volume::new(&root, "OS").with_selected(true)], 3);

    let request = SearchRequest::new("").with_mode(Mode::And).with_sample_size("10");
    assert_eq!(result_paths(&mut session, &request).len(), 3);
}

#[test]
fn test_single_sample_picks_both_candidates_evenly() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("os");
    create_os_volume(&root);
    let mut session = session_for(vec![Volume::new(&root, "OS").with_selected(true)], 4);

    let request = SearchRequest::new("x").with_sample_size("1");
    let trials = 2_000;
    let mut picked_a = 0;
    for _ in 0..trials {
        let paths = result_paths(&mut session, &request);
        assert_eq!(paths.len(), 1);
        if paths[0] == root.join("a.mp4") {
            picked_a += 1;
        }
    }
    assert!(
        (800..=1_200).contains(&picked_a),
        "a.mp4 picked {} of {} times",
        picked_a,
        trials
    );
}

#[test]
fn test_candidates_come_from_cache_on_repeat() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("os");
    create_os_volume(&root);
    let mut session = session_for(vec![Volume::new(&root, "OS").with_selected(true)], 5);

    let (first, _) = session.disk_candidates(&FilterQuery::parse("x"), Mode::Or);
    fs::remove_file(root.join("a.mp4")).unwrap();
    let (second, _) = session.disk_candidates(&FilterQuery::parse(" x "), Mode::Or);
    assert_eq!(first, second);
    assert_eq!(session.cache().len(), 1);

    // The cached list still names a.mp4, but the result only keeps files
    // that exist when it is assembled.
    let request = SearchRequest::new("x").with_sample_size("5");
    assert_eq!(result_paths(&mut session, &request), vec![root.join("b.avi")]);
}

#[test]
fn test_unreadable_volume_is_a_warning() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("os");
    create_os_volume(&root);
    let volumes = vec![
        Volume::new(tmp.path().join("unplugged"), "USB").with_selected(true),
        Volume::new(&root, "OS").with_selected(true),
    ];
    let mut session = session_for(volumes, 6);

    let outcome = session.search(&SearchRequest::new("x")).unwrap();
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].label, "USB");
    assert_eq!(outcome.result.unwrap().files.len(), 2);
}

#[test]
fn test_unselected_volumes_are_not_walked() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("os");
    create_os_volume(&root);
    let mut session = session_for(vec![Volume::new(&root, "OS")], 7);

    assert!(session.search(&SearchRequest::new("x")).unwrap().is_empty());
    assert!(session.select_volume("OS", true));
    assert!(!session.select_volume("MISSING", true));
    assert!(!session.search(&SearchRequest::new("x")).unwrap().is_empty());
}

#[test]
fn test_invalid_sample_size_fails_before_walking() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("os");
    create_os_volume(&root);
    let mut session = session_for(vec![Volume::new(&root, "OS").with_selected(true)], 8);

    let result = session.search(&SearchRequest::new("x").with_sample_size("lots"));
    assert!(matches!(result, Err(Error::InvalidSampleSize(ref text)) if text == "lots"));
    assert!(session.cache().is_empty());
}

#[test]
fn test_no_match_is_empty_outcome_and_not_recorded() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("os");
    create_os_volume(&root);
    let mut session = session_for(vec![Volume::new(&root, "OS").with_selected(true)], 9);

    let outcome = session.search(&SearchRequest::new("nothing")).unwrap();
    assert!(outcome.is_empty());
    assert!(session.history().is_empty());

    let outcome = session.search(&SearchRequest::new("x").with_sample_size("0")).unwrap();
    assert!(outcome.is_empty());
}

#[test]
fn test_duplicates_across_volumes_are_merged() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("os");
    create_os_volume(&root);
    let volumes = vec![
        Volume::new(&root, "OS").with_selected(true),
        Volume::new(&root, "OS-ALIAS").with_selected(true),
    ];
    let mut session = session_for(volumes, 10);

    let (candidates, _) = session.disk_candidates(&FilterQuery::parse("x"), Mode::Or);
    assert_eq!(candidates.len(), 4);
    let request = SearchRequest::new("x").with_sample_size("4");
    assert_eq!(result_paths(&mut session, &request).len(), 2);
}

#[test]
fn test_forget_removes_result_from_history() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("os");
    create_os_volume(&root);
    let mut session = session_for(vec![Volume::new(&root, "OS").with_selected(true)], 11);

    let result = session
        .search(&SearchRequest::new("x"))
        .unwrap()
        .result
        .unwrap();
    assert!(session.forget(&result));
    assert!(!session.forget(&result));
    assert!(session.history().is_empty());
}

#[test]
fn test_pins_outlive_searches() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("os");
    create_os_volume(&root);
    let mut session = session_for(vec![Volume::new(&root, "OS").with_selected(true)], 12);

    let result = session
        .search(&SearchRequest::new("x"))
        .unwrap()
        .result
        .unwrap();
    let first = result.files.iter().next().unwrap().clone();
    assert!(session.pins_mut().pin(first.clone()));
    assert!(!session.pins_mut().pin(first.clone()));

    session.search(&SearchRequest::new("y")).unwrap();
    assert_eq!(session.pins().entries(), &[first]);
}
