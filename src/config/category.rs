//! IP list categories offered by the list service.

use clap::ValueEnum;
use strum_macros::EnumIter;

/// A named IP list that can be fetched from the list service.
///
/// Only the curated "best" lists are small enough to enrich with per-address
/// lookups; the full Cloudflare ranges are always rendered as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, EnumIter)]
pub enum Category {
    /// Cloudflare IPv4 ranges
    #[value(name = "cfv4")]
    CfV4,
    /// Cloudflare IPv6 ranges
    #[value(name = "cfv6")]
    CfV6,
    /// Cloudflare reverse-proxy addresses
    #[value(name = "proxy")]
    Proxy,
    /// Best official Cloudflare addresses
    #[value(name = "bestcf")]
    BestCf,
    /// Best Cloudflare reverse-proxy addresses
    #[value(name = "bestproxy")]
    BestProxy,
}

impl Category {
    /// Key used in the list service query and in export file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CfV4 => "cfv4",
            Category::CfV6 => "cfv6",
            Category::Proxy => "proxy",
            Category::BestCf => "bestcf",
            Category::BestProxy => "bestproxy",
        }
    }

    /// Human-readable label used as the section heading.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::CfV4 => "Cloudflare IPv4 ranges",
            Category::CfV6 => "Cloudflare IPv6 ranges",
            Category::Proxy => "Cloudflare reverse-proxy IPs",
            Category::BestCf => "Best Cloudflare official IPs",
            Category::BestProxy => "Best Cloudflare reverse-proxy IPs",
        }
    }

    /// Whether addresses in this list may be enriched with detail lookups.
    pub fn supports_enrichment(&self) -> bool {
        matches!(self, Category::BestCf | Category::BestProxy)
    }
}
