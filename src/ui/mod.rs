/// UI module
///
/// - Screen selection and control availability (screen.rs)
/// - Widgets for each screen (card.rs)
/// - Keyboard shortcuts (shortcuts.rs)

pub mod card;
pub mod screen;
pub mod shortcuts;
