use crate::normalize::has_content;

/// Creative-content columns of the ad-group report, found by header role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreativeColumns {
    pub headlines: Vec<usize>,
    pub descriptions: Vec<usize>,
}

impl CreativeColumns {
    /// Every header containing a marker (case-insensitive) is a creative slot.
    pub fn resolve(headers: &[String], headline_marker: &str, description_marker: &str) -> Self {
        let headline_marker = headline_marker.to_lowercase();
        let description_marker = description_marker.to_lowercase();
        let mut cols = Self::default();
        for (i, h) in headers.iter().enumerate() {
            let lower = h.to_lowercase();
            if lower.contains(&headline_marker) {
                cols.headlines.push(i);
            } else if lower.contains(&description_marker) {
                cols.descriptions.push(i);
            }
        }
        cols
    }

    pub fn all(&self) -> impl Iterator<Item = usize> + '_ {
        self.headlines.iter().chain(self.descriptions.iter()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.headlines.is_empty() && self.descriptions.is_empty()
    }
}

/// An ad unit is active when any headline or description carries text.
pub fn is_active<'a, I>(fields: I, sentinel: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    fields.into_iter().any(|f| has_content(f, sentinel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_by_role() {
        let h = headers(&["Customer ID", "Headline 1", "HEADLINE 2", "Description 1", "Ad state"]);
        let cols = CreativeColumns::resolve(&h, "headline", "description");
        assert_eq!(cols.headlines, vec![1, 2]);
        assert_eq!(cols.descriptions, vec![3]);
        assert_eq!(cols.all().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn no_creative_columns() {
        let h = headers(&["Customer ID", "Campaign"]);
        assert!(CreativeColumns::resolve(&h, "headline", "description").is_empty());
    }

    #[test]
    fn sentinel_and_blank_are_inactive() {
        assert!(!is_active(["--", "  ", ""], "--"));
        assert!(!is_active(std::iter::empty(), "--"));
        assert!(is_active(["--", "Great Deal"], "--"));
    }

    proptest! {
        #[test]
        fn active_iff_some_field_has_text(
            fields in proptest::collection::vec(
                prop_oneof![
                    Just(String::new()),
                    Just("--".to_string()),
                    Just("   ".to_string()),
                    Just(" -- ".to_string()),
                    "[a-zA-Z]{1,8}",
                ],
                0..20,
            )
        ) {
            let expected = fields.iter().any(|f| f.chars().any(|c| c.is_ascii_alphabetic()));
            prop_assert_eq!(is_active(fields.iter().map(String::as_str), "--"), expected);
        }
    }
}
