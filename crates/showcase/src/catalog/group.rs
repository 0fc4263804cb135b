//! Variant sections for the cart and favorites pages.

use heritage_core::Variant;
use serde::Serialize;

use crate::store::Keyed;

/// One non-empty section of entries sharing a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantGroup<T> {
    pub variant: Variant,
    pub label: &'static str,
    pub entries: Vec<T>,
}

/// Partition `entries` by variant.
///
/// Groups come out in [`Variant::ALL`] order, empty groups are omitted and
/// entries keep their relative order within each group.
pub fn group_by_variant<T: Keyed>(entries: impl IntoIterator<Item = T>) -> Vec<VariantGroup<T>> {
    let mut groups: Vec<VariantGroup<T>> = Variant::ALL
        .iter()
        .map(|&variant| VariantGroup {
            variant,
            label: variant.label(),
            entries: Vec::new(),
        })
        .collect();

    for entry in entries {
        let variant = entry.item_key().variant;
        if let Some(group) = groups.iter_mut().find(|g| g.variant == variant) {
            group.entries.push(entry);
        }
    }

    groups.retain(|group| !group.entries.is_empty());
    groups
}
