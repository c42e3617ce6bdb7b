//! Display formatting for the subscriber counter.

/// Compacts large counts the way the landing page displays them:
/// `999`, `1.5K`, `2.0M`.
pub fn compact_number(n: i64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

pub fn subscriber_count(n: i64) -> String {
    format!("{} {}", compact_number(n), pluralize(n, "subscriber"))
}

/// The hero line under the signup form.
pub fn subscriber_message(count: Option<i64>) -> String {
    match count {
        Some(n) if n > 0 => format!(
            "Join {} ambitious builders who've already signed up",
            compact_number(n)
        ),
        _ => "Be the first ambitious builder to sign up".to_owned(),
    }
}

fn pluralize(n: i64, singular: &str) -> String {
    if n == 1 {
        singular.to_owned()
    } else {
        format!("{singular}s")
    }
}
