use crossterm::event::KeyCode;

const PAGE: usize = 5;

pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Moves a table cursor. Returns `true` when `key` was a navigation key.
pub fn navigate_list(index: &mut usize, len: usize, key: KeyCode) -> bool {
    let last = len.saturating_sub(1);
    *index = match key {
        KeyCode::Up => wrap_decrement(*index, len),
        KeyCode::Down => wrap_increment(*index, len),
        KeyCode::PageUp => index.saturating_sub(PAGE),
        KeyCode::PageDown => (*index + PAGE).min(last),
        KeyCode::Home => 0,
        KeyCode::End => last,
        _ => return false,
    };
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_cursor() {
        assert_eq!(wrap_decrement(0, 3), 2);
        assert_eq!(wrap_increment(2, 3), 0);
        assert_eq!(wrap_increment(0, 0), 0);
    }

    #[test]
    fn paging_stops_at_the_ends() {
        let mut index = 2;
        assert!(navigate_list(&mut index, 4, KeyCode::PageDown));
        assert_eq!(index, 3);
        assert!(navigate_list(&mut index, 4, KeyCode::PageUp));
        assert_eq!(index, 0);
        assert!(navigate_list(&mut index, 0, KeyCode::End));
        assert_eq!(index, 0);
        assert!(!navigate_list(&mut index, 4, KeyCode::Enter));
    }
}
