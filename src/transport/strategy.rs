//! Transport strategies.

use std::fmt;

use crate::config::{
    TransportKind, ALLORIGINS_RELAY, CORS_ANYWHERE_RELAY, DEFAULT_RELAY_ORIGIN,
    TARGET_PLACEHOLDER,
};
use crate::error_handling::TransportError;

/// How a request reaches its target.
///
/// Relay addresses are stored in the variant so they can be pointed at a
/// self-hosted relay (or a mock server in tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    /// Request the target URL unmodified.
    Direct,
    /// Append the raw target URL to `relay` and announce `origin`.
    CorsAnywhere {
        /// Relay prefix, ending with `/`.
        relay: String,
        /// Value of the `Origin` header.
        origin: String,
    },
    /// Pass the encoded target URL to `relay` as the `url` query parameter.
    AllOrigins {
        /// Relay endpoint without query string.
        relay: String,
    },
    /// Substitute the encoded target URL into a user template.
    Custom {
        /// Either contains `{target}` or ends with a separator.
        template: String,
    },
}

impl Transport {
    /// Prefix relay on the public cors-anywhere instance.
    pub fn cors_anywhere(origin: &str) -> Self {
        Transport::CorsAnywhere {
            relay: CORS_ANYWHERE_RELAY.to_string(),
            origin: origin.to_string(),
        }
    }

    /// Query relay on the public allorigins instance.
    pub fn all_origins() -> Self {
        Transport::AllOrigins {
            relay: ALLORIGINS_RELAY.to_string(),
        }
    }

    /// Custom relay from a user template.
    ///
    /// A template without `{target}` is treated as a prefix; a trailing `/` is
    /// appended unless it already ends with `/` or `=`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::EmptyTemplate` for a blank template.
    pub fn custom(template: &str) -> Result<Self, TransportError> {
        let template = template.trim();
        if template.is_empty() {
            return Err(TransportError::EmptyTemplate);
        }

        let template = if template.contains(TARGET_PLACEHOLDER) || ends_with_separator(template) {
            template.to_string()
        } else {
            format!("{}/", template)
        };
        Ok(Transport::Custom { template })
    }

    /// Builds a transport from a strategy name such as `"allorigins"`.
    ///
    /// `template` is only consulted for the `custom` strategy; the cors-anywhere
    /// relay announces [`DEFAULT_RELAY_ORIGIN`].
    ///
    /// # Errors
    ///
    /// Returns `TransportError::UnknownStrategy` for an unrecognized name and
    /// `TransportError::EmptyTemplate` for `custom` without a template.
    pub fn from_selection(name: &str, template: Option<&str>) -> Result<Self, TransportError> {
        Self::from_kind(name.parse::<TransportKind>()?, DEFAULT_RELAY_ORIGIN, template)
    }

    /// Builds the transport for `kind`.
    ///
    /// `origin` is the `Origin` header of the cors-anywhere relay and
    /// `template` the custom relay template; each is ignored by other kinds.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::EmptyTemplate` for `custom` without a template.
    pub fn from_kind(
        kind: TransportKind,
        origin: &str,
        template: Option<&str>,
    ) -> Result<Self, TransportError> {
        match kind {
            TransportKind::Direct => Ok(Transport::Direct),
            TransportKind::CorsAnywhere => Ok(Transport::cors_anywhere(origin)),
            TransportKind::AllOrigins => Ok(Transport::all_origins()),
            TransportKind::Custom => Transport::custom(template.unwrap_or_default()),
        }
    }

    /// Strategy name, as accepted by `from_selection`.
    pub fn name(&self) -> &'static str {
        match self {
            Transport::Direct => "direct",
            Transport::CorsAnywhere { .. } => "cors-anywhere",
            Transport::AllOrigins { .. } => "allorigins",
            Transport::Custom { .. } => "custom",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(super) fn ends_with_separator(template: &str) -> bool {
    template.ends_with('/') || template.ends_with('=')
}
