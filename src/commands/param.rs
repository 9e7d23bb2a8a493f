//! `name=value` query parameter parsing for the command line.

use anyhow::{Result, anyhow};
use std::str::FromStr;

use crate::client::Params;

/// A single query parameter given as "name=value".
#[derive(Debug, PartialEq, Clone)]
pub struct Param {
    pub name: String,
    pub value: String,
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl FromStr for Param {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Split on the first '=' only, values may contain more
        let (name, value) = s.split_once('=').ok_or_else(|| {
            anyhow!("Invalid parameter '{}'. Expected 'name=value'.", s)
        })?;

        if name.is_empty() {
            return Err(anyhow!(
                "Invalid parameter '{}': name before = cannot be empty.",
                s
            ));
        }

        Ok(Param {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

/// Collects parameters into a mapping. Later duplicates win.
pub fn to_params(params: Vec<Param>) -> Params {
    params.into_iter().map(|p| (p.name, p.value)).collect()
}
