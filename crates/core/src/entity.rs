//! Entity trait: identity that survives a server-side replacement.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Replace the entity with the same identity as `updated`.
///
/// Every other element is left untouched. Returns `false` when no element
/// matched (the list is then unchanged).
pub fn replace_by_id<E: Entity>(items: &mut [E], updated: E) -> bool {
    match items.iter_mut().find(|item| item.id() == updated.id()) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        label: &'static str,
    }

    impl Entity for Row {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    #[test]
    fn replaces_only_the_matching_identity() {
        let mut rows = vec![
            Row { id: 1, label: "a" },
            Row { id: 2, label: "b" },
            Row { id: 3, label: "c" },
        ];

        assert!(replace_by_id(&mut rows, Row { id: 2, label: "B" }));
        assert_eq!(
            rows,
            vec![
                Row { id: 1, label: "a" },
                Row { id: 2, label: "B" },
                Row { id: 3, label: "c" },
            ]
        );
    }

    #[test]
    fn unknown_identity_leaves_list_alone() {
        let mut rows = vec![Row { id: 1, label: "a" }];
        assert!(!replace_by_id(&mut rows, Row { id: 9, label: "z" }));
        assert_eq!(rows, vec![Row { id: 1, label: "a" }]);
    }
}
