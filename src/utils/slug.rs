/// Lowercase `name` and collapse every run of non-alphanumerics into one dash.
pub fn slugify(name: &str) -> String {
    let slug: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                '-'
            }
        })
        .collect();
    slug.split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn dashes_to_spaces(slug: &str) -> String {
    slug.replace('-', " ")
}

/// Drop a trailing `-state` (case-sensitive) and lowercase: `"lagos-state"` → `"lagos"`.
pub fn strip_state_suffix(slug: &str) -> String {
    slug.strip_suffix("-state").unwrap_or(slug).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_region_titles() {
        assert_eq!(slugify("Akwa Ibom"), "akwa-ibom");
        assert_eq!(slugify("  Federal Capital Territory "), "federal-capital-territory");
        assert_eq!(slugify("Cross  River!!"), "cross-river");
    }

    #[test]
    fn strip_state_suffix_only_trailing() {
        assert_eq!(strip_state_suffix("Kano-State"), "kano-state");
        assert_eq!(strip_state_suffix("kano-state"), "kano");
        assert_eq!(strip_state_suffix("state-house"), "state-house");
    }

    #[test]
    fn dashes_become_spaces() {
        assert_eq!(dashes_to_spaces("cross-river"), "cross river");
    }
}
