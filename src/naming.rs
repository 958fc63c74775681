//! Destination naming for flat namespaces
//!
//! quay.io does not allow nested repository paths under a namespace, so a
//! source path such as `team/app` has to become a single path segment.

/// Map a source repository path to a flat destination repository name.
///
/// Each segment is joined to the next with `-`, except that a segment equal
/// to the segment immediately after it is dropped. The last segment is always
/// kept.
///
/// ```
/// use registry_migrator::naming::flatten_repository_name;
///
/// assert_eq!(flatten_repository_name("blah/testing"), "blah-testing");
/// assert_eq!(flatten_repository_name("blah/blah"), "blah");
/// assert_eq!(flatten_repository_name("sugar/sugar/yes-please"), "sugar-yes-please");
/// ```
pub fn flatten_repository_name(repository: &str) -> String {
    let segments: Vec<&str> = repository.split('/').collect();
    let mut name = String::with_capacity(repository.len());

    for pair in segments.windows(2) {
        if pair[0] != pair[1] {
            name.push_str(pair[0]);
            name.push('-');
        }
    }

    if let Some(last) = segments.last() {
        name.push_str(last);
    }

    name
}
