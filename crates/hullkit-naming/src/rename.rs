//! Batch renaming of hulls after their source object.

use crate::discover::NamedItemMut;
use crate::template::generate;

/// A single rename performed by [`rename_items`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub old_name: String,
    pub new_name: String,
}

/// Renames `items` after `base_name` using `template`.
///
/// The item at position `i` receives index `i + 1`.
pub fn rename_items<T: NamedItemMut>(
    template: &str,
    base_name: &str,
    items: &mut [T],
) -> Vec<Rename> {
    items
        .iter_mut()
        .enumerate()
        .map(|(i, item)| {
            let new_name = generate(template, base_name, i + 1);
            let old_name = item.name().to_string();
            log::debug!("rename '{}' -> '{}'", old_name, new_name);
            item.set_name(new_name.clone());
            Rename { old_name, new_name }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rename_items() {
        let mut items = vec!["decomp_0".to_string(), "decomp_1".to_string()];
        let renames = rename_items("?_hull_#", "Cube", &mut items);
        assert_eq!(items, vec!["Cube_hull_1", "Cube_hull_2"]);
        assert_eq!(
            renames[1],
            Rename {
                old_name: "decomp_1".to_string(),
                new_name: "Cube_hull_2".to_string(),
            }
        );
    }

    #[test]
    fn test_rename_degenerate_template() {
        let mut items = vec!["a".to_string(), "b".to_string()];
        rename_items("hull", "Cube", &mut items);
        assert_eq!(items, vec!["hull1", "hull2"]);
    }
}
