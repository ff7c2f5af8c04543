use crate::foundation::error::{PagefxError, PagefxResult};
use anyhow::Context;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const BUILTIN: &str = include_str!("../../assets/catalog.json");

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Feature {
    /// Icon name as understood by the host's icon set.
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Solution {
    pub title: String,
    pub description: String,
    pub price: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NavAnchor {
    pub id: String,
    pub label: String,
}

/// Read-only page content. The motion core only depends on the counts.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Catalog {
    /// Text typed out under the hero title.
    #[serde(default)]
    pub tagline: String,
    pub cta_url: String,
    #[serde(default)]
    pub anchors: Vec<NavAnchor>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub solutions: Vec<Solution>,
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> PagefxResult<Self> {
        Self::from_json_str(BUILTIN)
    }

    pub fn from_json_str(s: &str) -> PagefxResult<Self> {
        let catalog: Self = serde_json::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> PagefxResult<Self> {
        let catalog: Self = serde_json::from_reader(r)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PagefxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open catalog JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> PagefxResult<()> {
        if !(self.cta_url.starts_with("https://") || self.cta_url.starts_with("http://")) {
            return Err(PagefxError::validation(format!(
                "catalog.cta_url must be an http(s) URL, got '{}'",
                self.cta_url
            )));
        }
        for (i, a) in self.anchors.iter().enumerate() {
            if a.id.is_empty() {
                return Err(PagefxError::validation(format!(
                    "catalog.anchors[{i}].id is empty"
                )));
            }
            if self.anchors[..i].iter().any(|b| b.id == a.id) {
                return Err(PagefxError::validation(format!(
                    "duplicate anchor id '{}'",
                    a.id
                )));
            }
        }
        Ok(())
    }

    pub fn anchor(&self, id: &str) -> Option<&NavAnchor> {
        self.anchors.iter().find(|a| a.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/catalog.rs"]
mod tests;
