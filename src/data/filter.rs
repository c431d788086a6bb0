use super::model::{DataGroup, NetObject, Project};

// ---------------------------------------------------------------------------
// Visibility: which measurements end up on the net
// ---------------------------------------------------------------------------

/// Address of one measurement inside a [`Project`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub group: usize,
    pub item: usize,
}

/// Indices of the groups that are drawn.
pub fn visible_groups(project: &Project) -> Vec<usize> {
    project
        .groups
        .iter()
        .enumerate()
        .filter(|(_, group)| group.enabled && !group.is_empty())
        .map(|(i, _)| i)
        .collect()
}

/// Every drawn measurement with its group, in plotting order.
pub fn visible_items(project: &Project) -> Vec<(ItemKey, &DataGroup, &NetObject)> {
    visible_groups(project)
        .into_iter()
        .flat_map(|group_idx| {
            let group = &project.groups[group_idx];
            group
                .net_objects()
                .iter()
                .enumerate()
                .map(move |(item_idx, netobj)| {
                    let key = ItemKey {
                        group: group_idx,
                        item: item_idx,
                    };
                    (key, group, netobj)
                })
        })
        .collect()
}

/// Look up the measurement behind a key, if it still exists.
pub fn item(project: &Project, key: ItemKey) -> Option<&NetObject> {
    project.groups.get(key.group)?.net_objects().get(key.item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Line;

    #[test]
    fn hidden_and_empty_groups_are_skipped() {
        let mut shown = DataGroup::new("shown");
        shown.add_net_object(NetObject::Line(Line::new(0.1, 0.2))).unwrap();
        shown.add_net_object(NetObject::Line(Line::new(0.3, 0.4))).unwrap();
        let mut hidden = shown.clone();
        hidden.enabled = false;
        let empty = DataGroup::new("empty");

        let project = Project::from_groups(vec![hidden, empty, shown]);
        assert_eq!(visible_groups(&project), vec![2]);

        let keys: Vec<_> = visible_items(&project).into_iter().map(|(k, _, _)| k).collect();
        assert_eq!(
            keys,
            vec![ItemKey { group: 2, item: 0 }, ItemKey { group: 2, item: 1 }]
        );
        assert_eq!(
            item(&project, keys[1]),
            Some(&NetObject::Line(Line::new(0.3, 0.4)))
        );
        assert_eq!(item(&project, ItemKey { group: 9, item: 0 }), None);
    }
}
