use std::collections::BTreeMap;

/// Where a key was found across the two sides of a comparison.
#[derive(Debug)]
pub(crate) enum Joined<'a, T> {
    OnlyOld(&'a T),
    OnlyNew(&'a T),
    Both(&'a T, &'a T),
}

/// Full outer join of two keyed collections, ascending by key.
///
/// Keys are expected to be unique on each side; with duplicates the last
/// entry of a side wins.
pub(crate) fn join<'a, K, T, I, J>(old: I, new: J) -> BTreeMap<K, Joined<'a, T>>
where
    K: Ord,
    I: IntoIterator<Item = (K, &'a T)>,
    J: IntoIterator<Item = (K, &'a T)>,
{
    let mut left: BTreeMap<K, &'a T> = old.into_iter().collect();
    let mut out: BTreeMap<K, Joined<'a, T>> = BTreeMap::new();
    for (key, n) in new {
        let joined = match left.remove(&key) {
            Some(o) => Joined::Both(o, n),
            None => Joined::OnlyNew(n),
        };
        out.insert(key, joined);
    }
    for (key, o) in left {
        out.insert(key, Joined::OnlyOld(o));
    }
    out
}
