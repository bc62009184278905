use std::collections::BTreeMap;

/// Path pattern -> redirect template (base URL followed by the target pattern).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RedirectTable {
    redirects: BTreeMap<String, String>,
}

impl RedirectTable {
    /// Pairs up `mappings` as (path, target), prefixing each target with `base`.
    ///
    /// A repeated path keeps its last target. A trailing unpaired element is ignored;
    /// callers reject odd-length input before getting here.
    pub fn build(base: &str, mappings: &[String]) -> Self {
        let redirects = mappings
            .chunks_exact(2)
            .map(|pair| (pair[0].clone(), format!("{}{}", base, pair[1])))
            .collect();
        Self { redirects }
    }

    pub(crate) fn len(&self) -> usize {
        self.redirects.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.redirects
            .iter()
            .map(|(path, template)| (path.as_str(), template.as_str()))
    }
}
