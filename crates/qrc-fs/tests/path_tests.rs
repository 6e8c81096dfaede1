use qrc_fs::NormalizedPath;
use rstest::rstest;

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("foo\\bar\\baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_normalize_mixed_slashes() {
    let path = NormalizedPath::new("foo/bar\\baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("foo/bar");
    assert_eq!(base.join("baz").as_str(), "foo/bar/baz");
    assert_eq!(NormalizedPath::new("foo/").join("baz").as_str(), "foo/baz");
}

#[test]
fn test_join_absolute_segment_replaces_base() {
    let base = NormalizedPath::new("/project/res");
    assert_eq!(base.join("/abs/icon.png").as_str(), "/abs/icon.png");
}

#[rstest]
#[case("/a/./b//c", "/a/b/c")]
#[case("/a/b/../c", "/a/c")]
#[case("/../a", "/a")]
#[case("a/../../b", "../b")]
#[case("./", ".")]
#[case("C:\\proj\\..\\res\\a.png", "C:/res/a.png")]
#[case("//server/share/./x", "//server/share/x")]
fn test_clean(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(input).clean().as_str(), expected);
}

#[test]
fn test_absolute_resolves_relative_against_base() {
    let base = NormalizedPath::new("/project/src");
    let rel = NormalizedPath::new("../images/logo.png");
    assert_eq!(rel.absolute(&base).as_str(), "/project/images/logo.png");
}

#[test]
fn test_absolute_keeps_absolute_input() {
    let base = NormalizedPath::new("/project");
    let abs = NormalizedPath::new("/other/./logo.png");
    assert_eq!(abs.absolute(&base).as_str(), "/other/logo.png");
}

#[rstest]
#[case("/a", true)]
#[case("C:/a", true)]
#[case("//srv/a", true)]
#[case("a/b", false)]
#[case("C:a", false)]
fn test_is_absolute(#[case] input: &str, #[case] expected: bool) {
    assert_eq!(NormalizedPath::new(input).is_absolute(), expected);
}

#[test]
fn test_relative_to() {
    let root = NormalizedPath::new("/project");
    let inside = NormalizedPath::new("/project/images/a.png");
    let sibling = NormalizedPath::new("/project-old/a.png");

    assert_eq!(inside.relative_to(&root), Some("images/a.png"));
    assert_eq!(sibling.relative_to(&root), None);
}

#[test]
fn test_parent_and_file_name() {
    let path = NormalizedPath::new("foo/bar/baz.qrc");
    assert_eq!(path.parent().unwrap().as_str(), "foo/bar");
    assert_eq!(path.file_name(), Some("baz.qrc"));
    assert_eq!(path.extension(), Some("qrc"));
}

#[test]
fn test_hidden_file_has_no_extension() {
    assert_eq!(NormalizedPath::new("dir/.hidden").extension(), None);
}

#[test]
fn test_canonical_resolves_existing_directory() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::create_dir(temp.path().join("sub")).unwrap();

    let canonical = NormalizedPath::canonical(temp.path().join("sub").join("..")).unwrap();
    let expected = NormalizedPath::canonical(temp.path()).unwrap();
    assert_eq!(canonical, expected);
    assert!(canonical.is_absolute());
}

#[test]
fn test_canonical_missing_directory_fails() {
    assert!(NormalizedPath::canonical("/nonexistent/path/that/does/not/exist").is_err());
}

#[test]
fn test_serde_round_trip_is_plain_string() {
    let path = NormalizedPath::new("C:\\res\\a.png");
    let json = serde_json::to_string(&path).unwrap();
    assert_eq!(json, "\"C:/res/a.png\"");
}
