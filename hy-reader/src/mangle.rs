//! Translating Hy names into identifier-friendly names and back.
//!
//! Symbols are stored in mangled form, so that `foo-bar`, `valid?` and
//! `*globals*` become `foo_bar`, `is_valid` and `GLOBALS`. The rules apply to
//! each dot-separated segment of a name independently.

/// Mangles a symbol name, segment by segment.
///
/// ```
/// # use hy_reader::mangle;
/// assert_eq!(mangle("foo-bar.empty?"), "foo_bar.is_empty");
/// assert_eq!(mangle("*debug*"), "DEBUG");
/// assert_eq!(mangle("set!"), "set_bang");
/// ```
pub fn mangle(name: &str) -> String {
    name.split('.')
        .map(mangle_segment)
        .collect::<Vec<_>>()
        .join(".")
}

fn mangle_segment(segment: &str) -> String {
    let mut name = segment.to_owned();
    if name.starts_with('*') && name.ends_with('*') && !matches!(segment, "*" | "**") {
        name = name[1..name.len() - 1].to_uppercase();
    }
    if name.contains('-') && name != "-" {
        name = name.replace('-', "_");
    }
    if name.ends_with('?') && name != "?" {
        name.pop();
        name.insert_str(0, "is_");
    }
    if name.ends_with('!') && name != "!" {
        name.pop();
        name.push_str("_bang");
    }
    name
}

/// Approximately reverses [`mangle`] for a single segment.
///
/// The translation is lossy: `is_foo` turns into `foo?` even if it was
/// written that way, and upper-case names regain earmuffs.
///
/// ```
/// # use hy_reader::unmangle;
/// assert_eq!(unmangle("is_empty"), "empty?");
/// assert_eq!(unmangle("set_bang"), "set!");
/// assert_eq!(unmangle("DEBUG"), "*debug*");
/// ```
pub fn unmangle(name: &str) -> String {
    let mut name = name.to_owned();
    if name.ends_with("_bang") && name != "_bang" {
        name.truncate(name.len() - "_bang".len());
        name.push('!');
    }
    if name.starts_with("is_") && name != "is_" {
        name.replace_range(.."is_".len(), "");
        name.push('?');
    }
    if name.contains('_') && name != "_" {
        name = name.replace('_', "-");
    }
    if is_upper_case(&name) {
        name = format!("*{}*", name.to_lowercase());
    }
    name
}

fn is_upper_case(name: &str) -> bool {
    name.chars().any(char::is_alphabetic)
        && name
            .chars()
            .all(|c| c == '_' || (c.is_alphabetic() && c.is_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::{mangle, unmangle};

    #[test]
    fn earmuffs() {
        assert_eq!(mangle("*foo*"), "FOO");
        assert_eq!(mangle("*foo-bar*"), "FOO_BAR");
        assert_eq!(mangle("*"), "*");
        assert_eq!(mangle("**"), "**");
        assert_eq!(mangle("***"), "*");
        assert_eq!(mangle("*foo"), "*foo");
    }

    #[test]
    fn hyphens() {
        assert_eq!(mangle("foo-bar-baz"), "foo_bar_baz");
        assert_eq!(mangle("-"), "-");
        assert_eq!(mangle("-foo"), "_foo");
        assert_eq!(mangle("--"), "__");
    }

    #[test]
    fn predicates_and_bangs() {
        assert_eq!(mangle("foo?"), "is_foo");
        assert_eq!(mangle("?"), "?");
        assert_eq!(mangle("foo!"), "foo_bang");
        assert_eq!(mangle("!"), "!");
        assert_eq!(mangle("foo-bar?"), "is_foo_bar");
    }

    #[test]
    fn segments() {
        assert_eq!(mangle("foo-bar.baz?"), "foo_bar.is_baz");
        assert_eq!(mangle("*a*.b"), "A.b");
        assert_eq!(mangle(".foo-bar"), ".foo_bar");
        assert_eq!(mangle("."), ".");
        assert_eq!(mangle("..."), "...");
    }

    #[test]
    fn mangled_names_are_stable() {
        for name in &["foo-bar", "*x*", "ok?", "go!", "a-b.c-d", "is_it", "-"] {
            let once = mangle(name);
            assert_eq!(mangle(&once), once, "{}", name);
        }
    }

    #[test]
    fn unmangle_rules() {
        assert_eq!(unmangle("foo_bar"), "foo-bar");
        assert_eq!(unmangle("_"), "_");
        assert_eq!(unmangle("is_"), "is-");
        assert_eq!(unmangle("_bang"), "-bang");
        assert_eq!(unmangle("is_foo_bang"), "foo!?");
        assert_eq!(unmangle("FOO"), "*foo*");
        assert_eq!(unmangle("X1"), "X1");
        assert_eq!(unmangle("foo"), "foo");
    }

    #[test]
    fn hyphens_survive_a_round_trip() {
        assert_eq!(unmangle(&mangle("foo-bar")), "foo-bar");
    }

    #[test]
    fn underscores_do_not_survive_a_round_trip() {
        assert_eq!(unmangle(&mangle("foo_bar")), "foo-bar");
        assert_eq!(unmangle(&mangle("*foo-bar*")), "FOO-BAR");
    }
}
