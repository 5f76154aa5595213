//! Named deployments of the spaces service and their base URLs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named deployment of the spaces service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Stage,
    /// Declared by the service but without a public endpoint.
    Sandbox,
    Local,
}

impl Environment {
    /// Base URL of the environment, or `None` when it has no endpoint.
    pub fn server_url(self) -> Option<&'static str> {
        match self {
            Environment::Production => Some("https://mmx-spaces-api-prod.herokuapp.com"),
            Environment::Stage => Some("https://mmx-spaces-api-stage.herokuapp.com"),
            Environment::Local => Some("http://localhost:5000"),
            Environment::Sandbox => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Stage => "stage",
            Environment::Sandbox => "sandbox",
            Environment::Local => "local",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "stage" => Ok(Environment::Stage),
            "sandbox" => Ok(Environment::Sandbox),
            "local" => Ok(Environment::Local),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_environments_resolve() {
        assert_eq!(
            Environment::Production.server_url(),
            Some("https://mmx-spaces-api-prod.herokuapp.com")
        );
        assert_eq!(
            Environment::Stage.server_url(),
            Some("https://mmx-spaces-api-stage.herokuapp.com")
        );
        assert_eq!(Environment::Local.server_url(), Some("http://localhost:5000"));
    }

    #[test]
    fn sandbox_has_no_endpoint() {
        assert_eq!(Environment::Sandbox.server_url(), None);
    }

    #[test]
    fn parses_and_displays_lowercase_names() {
        for env in [
            Environment::Production,
            Environment::Stage,
            Environment::Sandbox,
            Environment::Local,
        ] {
            assert_eq!(env.to_string().parse::<Environment>().unwrap(), env);
        }
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Production);
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Environment::Local).unwrap();
        assert_eq!(json, r#""local""#);
        let back: Environment = serde_json::from_str(r#""stage""#).unwrap();
        assert_eq!(back, Environment::Stage);
    }
}
