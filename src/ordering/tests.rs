use super::*;

fn sample_paths() -> Vec<&'static str> {
    vec![
        "src/pages/index.vue",
        "src/pages/a.vue",
        "src/pages/B.vue",
        "src/pages/b.vue",
        "src/pages/file1.vue",
        "src/pages/file01.vue",
        "src/pages/file2.vue",
        "src/pages/file10.vue",
        "src/pages/parent.vue",
        "src/pages/parent",
        "src/pages/parent/index.vue",
        "src/pages/parent/child.vue",
        "src/pages/parent-x.vue",
        "src/pages/[id].vue",
        "src/pages/[...all].vue",
        "src/pages/users/[id]/edit.vue",
        "src/pages/users.vue",
        "src/pages/caf\u{e9}.vue",
        "src/pages/cafe.vue",
        "/users",
        "/users/[id]",
        "",
        "/",
        "a//b",
    ]
}

#[test]
fn test_index_priority_example() {
    let sorted = sorted_paths([
        "/users/[id]/other",
        "/users",
        "/users/[id]",
        "/users/[id]/edit",
    ]);
    assert_eq!(
        sorted,
        vec!["/users", "/users/[id]", "/users/[id]/edit", "/users/[id]/other"]
    );
}

#[test]
fn test_files_before_folders() {
    let sorted = sorted_paths(["src/pages/parent/child.vue", "src/pages/parent.vue"]);
    assert_eq!(sorted, vec!["src/pages/parent.vue", "src/pages/parent/child.vue"]);
}

#[test]
fn test_file_before_extensionless_sibling() {
    assert_eq!(
        compare_paths("src/pages/parent.vue", "src/pages/parent"),
        Ordering::Less
    );
}

#[test]
fn test_index_first_within_directory() {
    let sorted = sorted_paths(["src/pages/a.vue", "src/pages/index.vue", "src/pages/b.vue"]);
    assert_eq!(
        sorted,
        vec!["src/pages/index.vue", "src/pages/a.vue", "src/pages/b.vue"]
    );
}

#[test]
fn test_index_file_before_index_directory() {
    let sorted = sorted_paths(["src/pages/index/about.vue", "src/pages/index.vue"]);
    assert_eq!(sorted, vec!["src/pages/index.vue", "src/pages/index/about.vue"]);
}

#[test]
fn test_numeric_aware_ordering() {
    let sorted = sorted_paths([
        "src/pages/file10.vue",
        "src/pages/file2.vue",
        "src/pages/file1.vue",
    ]);
    assert_eq!(
        sorted,
        vec!["src/pages/file1.vue", "src/pages/file2.vue", "src/pages/file10.vue"]
    );
}

#[test]
fn test_unicode_normalization() {
    let composed = "src/pages/caf\u{e9}.vue";
    let decomposed = "src/pages/cafe\u{301}.vue";
    assert_ne!(composed, decomposed);
    assert_eq!(compare_paths(composed, decomposed), Ordering::Equal);

    let sorted = sorted_paths([composed, "src/pages/cafz.vue", decomposed, "src/pages/cafe.vue"]);
    let first = sorted.iter().position(|p| p == composed).unwrap();
    let second = sorted.iter().position(|p| p == decomposed).unwrap();
    assert_eq!(first.abs_diff(second), 1, "normalized twins must be adjacent: {sorted:?}");
}

#[test]
fn test_case_ties_put_lowercase_first() {
    let sorted = sorted_paths(["B.vue", "a.vue", "A.vue", "b.vue"]);
    assert_eq!(sorted, vec!["a.vue", "A.vue", "b.vue", "B.vue"]);
}

#[test]
fn test_leading_separators_ignored() {
    assert_eq!(compare_paths("/users", "users"), Ordering::Equal);
    assert_eq!(compare_paths("//users", "users"), Ordering::Equal);
}

#[test]
fn test_custom_index_name() {
    let ordering = PathOrdering::new("home");
    let sorted = ordering.sorted(["pages/about.vue", "pages/home.vue", "pages/index.vue"]);
    assert_eq!(
        sorted,
        vec!["pages/home.vue", "pages/about.vue", "pages/index.vue"]
    );
}

#[test]
fn test_equal_only_when_identical() {
    let paths = sample_paths();
    for a in &paths {
        for b in &paths {
            let ordering = compare_paths(a, b);
            if ordering == Ordering::Equal {
                let ka = PathOrdering::default().key(a);
                let kb = PathOrdering::default().key(b);
                let ta: Vec<&str> = ka.segments().iter().map(SegmentKey::text).collect();
                let tb: Vec<&str> = kb.segments().iter().map(SegmentKey::text).collect();
                assert_eq!(ta, tb, "{a:?} == {b:?} but segments differ");
            }
        }
    }
}

#[test]
fn test_antisymmetric() {
    let paths = sample_paths();
    for a in &paths {
        for b in &paths {
            assert_eq!(
                compare_paths(a, b),
                compare_paths(b, a).reverse(),
                "antisymmetry broken for {a:?} / {b:?}"
            );
        }
    }
}

#[test]
fn test_transitive() {
    let paths = sample_paths();
    for a in &paths {
        for b in &paths {
            for c in &paths {
                if compare_paths(a, b) != Ordering::Greater
                    && compare_paths(b, c) != Ordering::Greater
                {
                    assert_ne!(
                        compare_paths(a, c),
                        Ordering::Greater,
                        "transitivity broken for {a:?} <= {b:?} <= {c:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_sort_is_idempotent_and_input_order_independent() {
    let paths = sample_paths();
    let once = sorted_paths(paths.iter().copied());
    let twice = sorted_paths(once.clone());
    assert_eq!(once, twice);

    let reversed = sorted_paths(paths.iter().rev().copied());
    assert_eq!(once, reversed);

    let mut rotated: Vec<&str> = paths.clone();
    rotated.rotate_left(7);
    assert_eq!(once, sorted_paths(rotated));
}

#[test]
fn test_equal_keys_ordered_by_raw_text() {
    assert_eq!(compare_paths("/users", "users"), Ordering::Equal);
    assert_eq!(compare_paths("caf\u{e9}", "cafe\u{301}"), Ordering::Equal);

    let forward = sorted_paths(["users", "/users", "cafe\u{301}", "caf\u{e9}", "/", ""]);
    let backward = sorted_paths(["", "/", "caf\u{e9}", "cafe\u{301}", "/users", "users"]);
    assert_eq!(forward, backward);
    assert_eq!(&forward[..2], &["".to_string(), "/".to_string()]);
}

#[test]
fn test_sort_in_place_on_borrowed_strs() {
    let mut paths = vec!["b.vue", "index.vue", "a.vue"];
    sort_paths(&mut paths);
    assert_eq!(paths, vec!["index.vue", "a.vue", "b.vue"]);
}

#[test]
fn test_segment_flags() {
    let key = PathOrdering::default().key("src/index/parent.vue");
    let segments = key.segments();
    assert_eq!(segments.len(), 3);
    assert!(segments[1].is_index());
    assert!(!segments[1].is_leaf());
    assert!(segments[2].is_leaf());
    assert!(!segments[2].is_index());
}
