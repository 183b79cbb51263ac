use super::GridEvent;

/// Keyboard mnemonics in grid order: the left hand's qwer/asdf/zxcv block
/// maps onto the first three rows of the four-column grid.
pub const MNEMONIC_KEYS: [char; 12] = ['q', 'w', 'e', 'r', 'a', 's', 'd', 'f', 'z', 'x', 'c', 'v'];

const ESCAPE: &str = "Escape";

/// Grid index bound to `key`, regardless of how many items are shown.
pub fn index_for_key(key: &str) -> Option<usize> {
    let mut chars = key.chars();
    let c = chars.next()?.to_ascii_lowercase();
    if chars.next().is_some() {
        return None;
    }
    MNEMONIC_KEYS.iter().position(|k| *k == c)
}

/// Mnemonic shown for the cell at `index`, if it has one.
pub fn key_for_index(index: usize) -> Option<char> {
    MNEMONIC_KEYS.get(index).copied()
}

/// Maps a key name (as reported by GDK, e.g. `"q"`, `"Q"`, `"Escape"`) to a
/// grid event. `len` is the number of items currently shown; mnemonics past
/// the end of the list are ignored.
pub fn route_key(key: &str, len: usize) -> Option<GridEvent> {
    if key == ESCAPE {
        return Some(GridEvent::EscapePressed);
    }
    index_for_key(key)
        .filter(|index| *index < len)
        .map(GridEvent::ItemActivated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_in_grid_order() {
        for (i, key) in ["q", "w", "e", "r", "a", "s", "d", "f", "z", "x", "c", "v"]
            .iter()
            .enumerate()
        {
            assert_eq!(index_for_key(key), Some(i));
            assert_eq!(key_for_index(i).map(|c| c.to_string()).as_deref(), Some(*key));
        }
        assert_eq!(key_for_index(12), None);
    }

    #[test]
    fn letters_are_case_insensitive() {
        assert_eq!(index_for_key("Q"), Some(0));
        assert_eq!(index_for_key("V"), Some(11));
    }

    #[test]
    fn other_keys_are_ignored() {
        for key in ["t", "1", "Return", "space", "", "qq", "escape"] {
            assert_eq!(route_key(key, 12), None, "{:?} should be ignored", key);
        }
    }

    #[test]
    fn each_mnemonic_activates_only_within_list_bounds() {
        for len in 0..=12 {
            for (i, key) in MNEMONIC_KEYS.iter().enumerate() {
                let routed = route_key(&key.to_string(), len);
                if i < len {
                    assert_eq!(routed, Some(GridEvent::ItemActivated(i)));
                } else {
                    assert_eq!(routed, None);
                }
            }
        }
    }

    #[test]
    fn escape_always_routes() {
        assert_eq!(route_key("Escape", 0), Some(GridEvent::EscapePressed));
        assert_eq!(route_key("Escape", 12), Some(GridEvent::EscapePressed));
    }
}
