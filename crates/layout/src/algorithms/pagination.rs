/// Whether a line needing `clearance` below `cursor_y` would cross `limit_y`.
///
/// * `cursor_y`: The current Y position, measured from the page top.
/// * `clearance`: The space the next line needs below the cursor.
/// * `limit_y`: The lowest Y position content may reach on this page.
pub fn needs_page_break(cursor_y: f32, clearance: f32, limit_y: f32) -> bool {
    // Use a small epsilon to handle floating point inaccuracies
    const EPSILON: f32 = 0.01;
    cursor_y + clearance > limit_y + EPSILON
}
