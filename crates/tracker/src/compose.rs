//! Message composition.
//!
//! Pure functions only — no network, no time access. Kept separate from the
//! polling loop so the formatting rules are unit-testable on their own.

use deathwatch_common::types::ProfileSnapshot;

/// Join clauses into a natural-language list.
///
/// Two clauses join with a bare "and"; three or more use the Oxford comma.
pub fn connect_clauses(clauses: &[String]) -> String {
    match clauses {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

/// Build the full notification text for one tick.
///
/// Profiles below `min_deaths` are dropped; the rest keep their input order.
/// With no qualifying profiles the result is the degenerate but valid
/// `"<displayName> has died "`. A non-empty `tags` list is appended on a
/// trailing line, space-joined.
pub fn compose_message(
    display_name: &str,
    snapshots: &[ProfileSnapshot],
    min_deaths: u64,
    tags: &[String],
) -> String {
    let clauses: Vec<String> = snapshots
        .iter()
        .filter(|snapshot| snapshot.death_count >= min_deaths)
        .map(|snapshot| {
            format!(
                "{} times on profile {}",
                snapshot.death_count, snapshot.profile_name
            )
        })
        .collect();

    let mut message = format!("{display_name} has died {}", connect_clauses(&clauses));
    if !tags.is_empty() {
        message.push('\n');
        message.push_str(&tags.join(" "));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clauses(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn snapshot(name: &str, deaths: u64) -> ProfileSnapshot {
        ProfileSnapshot {
            profile_name: name.to_string(),
            death_count: deaths,
        }
    }

    #[test]
    fn connect_empty() {
        assert_eq!(connect_clauses(&[]), "");
    }

    #[test]
    fn connect_one() {
        assert_eq!(connect_clauses(&clauses(&["a"])), "a");
    }

    #[test]
    fn connect_two() {
        assert_eq!(connect_clauses(&clauses(&["a", "b"])), "a and b");
    }

    #[test]
    fn connect_three_uses_oxford_comma() {
        assert_eq!(connect_clauses(&clauses(&["a", "b", "c"])), "a, b, and c");
    }

    #[test]
    fn connect_four() {
        assert_eq!(
            connect_clauses(&clauses(&["a", "b", "c", "d"])),
            "a, b, c, and d"
        );
    }

    #[test]
    fn filters_below_threshold() {
        let snapshots = vec![snapshot("Foo", 5), snapshot("Bar", 0)];
        assert_eq!(
            compose_message("Alice", &snapshots, 1, &[]),
            "Alice has died 5 times on profile Foo"
        );
    }

    #[test]
    fn appends_tags_on_trailing_line() {
        let snapshots = vec![snapshot("Foo", 5), snapshot("Bar", 0)];
        let message = compose_message("Alice", &snapshots, 1, &clauses(&["@here"]));
        assert!(message.ends_with("\n@here"));
    }

    #[test]
    fn multiple_tags_are_space_joined() {
        let snapshots = vec![snapshot("Foo", 5)];
        let message = compose_message("Alice", &snapshots, 1, &clauses(&["@here", "@bob"]));
        assert_eq!(
            message,
            "Alice has died 5 times on profile Foo\n@here @bob"
        );
    }

    #[test]
    fn no_qualifying_profiles_is_degenerate_but_valid() {
        let snapshots = vec![snapshot("Foo", 0)];
        assert_eq!(compose_message("Alice", &snapshots, 1, &[]), "Alice has died ");
    }

    #[test]
    fn clause_count_and_order_match_filtered_input() {
        let snapshots = vec![
            snapshot("First", 3),
            snapshot("Skipped", 1),
            snapshot("Second", 2),
            snapshot("Third", 9),
        ];
        let message = compose_message("Alice", &snapshots, 2, &[]);
        assert_eq!(
            message,
            "Alice has died 3 times on profile First, 2 times on profile Second, \
             and 9 times on profile Third"
        );
    }

    #[test]
    fn threshold_zero_keeps_every_profile() {
        let snapshots = vec![snapshot("Foo", 0), snapshot("Bar", 4)];
        assert_eq!(
            compose_message("Alice", &snapshots, 0, &[]),
            "Alice has died 0 times on profile Foo and 4 times on profile Bar"
        );
    }
}
