use std::collections::BTreeMap;

/// Drops the entry at `index` and moves every entry behind it one position forward.
///
/// All state keyed by exercise position goes through this function when an exercise is removed.
pub(crate) fn remove_index<V>(map: &mut BTreeMap<usize, V>, index: usize) -> Option<V> {
    let mut tail = map.split_off(&index);
    let removed = tail.remove(&index);
    map.extend(tail.into_iter().map(|(i, v)| (i - 1, v)));
    removed
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, Some('a'), BTreeMap::from([(0, 'b'), (1, 'c')]))]
    #[case(1, Some('b'), BTreeMap::from([(0, 'a'), (1, 'c')]))]
    #[case(2, Some('c'), BTreeMap::from([(0, 'a'), (1, 'b')]))]
    #[case(3, None, BTreeMap::from([(0, 'a'), (1, 'b'), (2, 'c')]))]
    fn test_remove_index(
        #[case] index: usize,
        #[case] removed: Option<char>,
        #[case] expected: BTreeMap<usize, char>,
    ) {
        let mut map = BTreeMap::from([(0, 'a'), (1, 'b'), (2, 'c')]);
        assert_eq!(remove_index(&mut map, index), removed);
        assert_eq!(map, expected);
    }

    #[test]
    fn test_remove_index_sparse() {
        let mut map = BTreeMap::from([(0, 'a'), (4, 'e')]);
        assert_eq!(remove_index(&mut map, 2), None);
        assert_eq!(map, BTreeMap::from([(0, 'a'), (3, 'e')]));
    }
}
