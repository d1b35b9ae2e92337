/// Identifies a ball and the hole it belongs to. Ball IDs start at 1, in the order balls were added.
pub type BallID = usize;

/// The letter a ball is drawn with; its hole uses the lowercase form.
pub(crate) fn ball_display(ball: BallID) -> char {
    match ball {
        1..=26 => char::from(b'A' + (ball - 1) as u8),
        _ => '#',
    }
}
