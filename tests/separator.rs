use callmap::core::separator::SeparatorUtility;

#[test]
fn split_returns_bucket_and_name() {
    let separator = SeparatorUtility::default();
    let (bucket, name) = separator.split("bucket/A_Workflow").unwrap();
    assert_eq!(bucket, "bucket");
    assert_eq!(name, "A_Workflow");
}

#[test]
fn split_rejects_wrong_component_counts() {
    let separator = SeparatorUtility::default();
    assert!(separator.split("no-separator").is_err());
    assert!(separator.split("a/b/c").is_err());
    assert!(separator.split("/name").is_err());
    assert!(separator.split("bucket/").is_err());
    assert!(separator.split("").is_err());
}

#[test]
fn custom_separator_is_honoured() {
    let separator = SeparatorUtility::new(':');
    let (bucket, name) = separator.split("bucket:object").unwrap();
    assert_eq!(bucket, "bucket");
    assert_eq!(name, "object");
    // The default separator is now an ordinary character.
    assert_eq!(separator.split("a/b:c").unwrap().0, "a/b");
}

#[test]
fn join_is_the_inverse_of_split() {
    let separator = SeparatorUtility::default();
    let joined = separator.join("bucket", "object");
    assert_eq!(joined, "bucket/object");
    assert_eq!(
        separator.split(&joined).unwrap(),
        ("bucket".to_string(), "object".to_string())
    );
}
