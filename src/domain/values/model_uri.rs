use std::fmt;
use std::str::FromStr;

/// How a registered model version is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    /// Latest version in a lifecycle stage (e.g. "Production")
    Stage(String),
    /// Explicit version number
    Version(u64),
    /// Named alias (e.g. "champion")
    Alias(String),
}

/// Registry model reference: `models:/<name>/<stage|version>` or `models:/<name>@<alias>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelUri {
    pub name: String,
    pub selector: VersionSelector,
}

const SCHEME: &str = "models:/";

impl ModelUri {
    pub fn staged(name: &str, stage: &str) -> Self {
        Self {
            name: name.to_string(),
            selector: VersionSelector::Stage(stage.to_string()),
        }
    }
}

impl fmt::Display for ModelUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.selector {
            VersionSelector::Stage(stage) => write!(f, "{SCHEME}{}/{stage}", self.name),
            VersionSelector::Version(v) => write!(f, "{SCHEME}{}/{v}", self.name),
            VersionSelector::Alias(alias) => write!(f, "{SCHEME}{}@{alias}", self.name),
        }
    }
}

impl FromStr for ModelUri {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(SCHEME)
            .ok_or_else(|| format!("Model URI must start with '{SCHEME}': {s}"))?;

        if let Some((name, alias)) = rest.split_once('@') {
            if name.is_empty() || alias.is_empty() || alias.contains('/') {
                return Err(format!("Invalid alias model URI: {s}"));
            }
            return Ok(Self {
                name: name.to_string(),
                selector: VersionSelector::Alias(alias.to_string()),
            });
        }

        let (name, suffix) = rest
            .split_once('/')
            .ok_or_else(|| format!("Model URI needs a stage, version or alias: {s}"))?;
        if name.is_empty() || suffix.is_empty() || suffix.contains('/') {
            return Err(format!("Invalid model URI: {s}"));
        }

        let selector = match suffix.parse::<u64>() {
            Ok(v) => VersionSelector::Version(v),
            Err(_) => VersionSelector::Stage(suffix.to_string()),
        };
        Ok(Self {
            name: name.to_string(),
            selector,
        })
    }
}
