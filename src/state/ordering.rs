/// Display-order policy for the catalog.
///
/// The admin UI moves a piece one step up or down the list. That is a
/// pairwise swap of the two neighbors' `display_order` ranks, never a full
/// re-rank, so rank uniqueness is preserved by construction. Persistence
/// stays with the caller (`Catalog::reorder`).

use super::data::Artwork;

/// Direction of a single-step move in the display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Swap the rank of the artwork at `index` with its neighbor in the given
/// direction, then re-sort the slice by rank.
///
/// Returns `false` (leaving the slice untouched) when the move would fall
/// off either end of the list. On `true`, the caller should persist the
/// whole set via `Catalog::reorder`.
pub fn move_item(artworks: &mut [Artwork], index: usize, direction: MoveDirection) -> bool {
    if index >= artworks.len() {
        return false;
    }

    let target = match direction {
        MoveDirection::Up => {
            if index == 0 {
                return false;
            }
            index - 1
        }
        MoveDirection::Down => {
            if index + 1 >= artworks.len() {
                return false;
            }
            index + 1
        }
    };

    let rank = artworks[index].display_order;
    artworks[index].display_order = artworks[target].display_order;
    artworks[target].display_order = rank;

    artworks.sort_by_key(|a| a.display_order);
    true
}
