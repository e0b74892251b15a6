//! Partitioning a list into equivalence classes.
//!
//! Every "split by predicate" step of the pipeline (prefix hash, full hash,
//! byte equality) uses [`partition_by`]. The first unclaimed item becomes
//! the anchor of a new class; every later unclaimed item equal to the anchor
//! joins it. For an equivalence relation this yields exactly the classes of
//! the input, each in input order.

/// Split `items` into classes of mutually equal items.
///
/// Classes with a single member are discarded. Classes are returned in the
/// order of their anchors, and members keep their input order.
///
/// `eq` must be an equivalence relation. It is only ever called with an
/// anchor as the first argument and a later item as the second.
///
/// # Errors
///
/// The first error returned by `eq` aborts the partition and is propagated.
///
/// # Example
///
/// ```
/// use crossdupe::duplicates::partition_by;
///
/// let classes = partition_by(vec![1, 2, 11, 3, 21], |a, b| {
///     Ok::<_, std::convert::Infallible>(a % 10 == b % 10)
/// })
/// .unwrap();
///
/// assert_eq!(classes, vec![vec![1, 11, 21]]);
/// ```
pub fn partition_by<T, E, F>(items: Vec<T>, mut eq: F) -> Result<Vec<Vec<T>>, E>
where
    F: FnMut(&T, &T) -> Result<bool, E>,
{
    let n = items.len();
    let mut class_of: Vec<Option<usize>> = vec![None; n];
    let mut class_count = 0;

    for i in 0..n.saturating_sub(1) {
        if class_of[i].is_some() {
            continue;
        }
        let mut anchored = false;
        for j in (i + 1)..n {
            if class_of[j].is_some() {
                continue;
            }
            if eq(&items[i], &items[j])? {
                if !anchored {
                    class_of[i] = Some(class_count);
                    class_count += 1;
                    anchored = true;
                }
                class_of[j] = class_of[i];
            }
        }
    }

    let mut classes: Vec<Vec<T>> = (0..class_count).map(|_| Vec::new()).collect();
    for (item, class) in items.into_iter().zip(class_of) {
        if let Some(idx) = class {
            classes[idx].push(item);
        }
    }

    Ok(classes)
}
