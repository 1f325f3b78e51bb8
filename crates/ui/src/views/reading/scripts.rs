pub(super) const READING_ROOT_ID: &str = "reading-root";

/// Move keyboard focus to the element with `id`, if it is mounted.
pub(super) fn focus_script(id: &str) -> String {
    format!("document.getElementById({id:?})?.focus();")
}
