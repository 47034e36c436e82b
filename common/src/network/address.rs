//! # Spoofed Client Address Policy
//!
//! Decides which IPv4 addresses are acceptable as a forged client address and
//! draws fresh ones for the spoofed request header.
//!
//! An address is *excluded* when it is private (RFC 1918), sits at or above the
//! multicast boundary, or belongs to a well-known public DNS resolver.

use std::fmt;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use thiserror::Error;

use crate::info;

/// Header value that asks for a freshly generated address on every run.
pub const RANDOM_IP_SENTINEL: &str = "random-ip";

/// Upper bound on rejection-sampling rounds before generation gives up.
pub const MAX_GENERATION_ATTEMPTS: usize = 10_000;

/// Public resolvers that must never be impersonated.
pub const DNS_RESOLVERS: [Ipv4Addr; 10] = [
    Ipv4Addr::new(8, 8, 8, 8),
    Ipv4Addr::new(8, 8, 4, 4),
    Ipv4Addr::new(1, 1, 1, 1),
    Ipv4Addr::new(1, 0, 0, 1),
    Ipv4Addr::new(9, 9, 9, 9),
    Ipv4Addr::new(149, 112, 112, 112),
    Ipv4Addr::new(208, 67, 222, 222),
    Ipv4Addr::new(208, 67, 220, 220),
    Ipv4Addr::new(64, 6, 64, 6),
    Ipv4Addr::new(64, 6, 65, 6),
];

static IPV4_SYNTAX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,3}\.){3}[0-9]{1,3}$").expect("IPv4 pattern compiles")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("unable to generate a public address after {attempts} attempts")]
    Exhausted { attempts: usize },
}

/// Configured value of the spoofed header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    /// Draw a new public address for every invocation.
    RandomIp,
    /// A fixed dotted-quad, already checked against the IPv4 grammar.
    Literal(String),
}

impl HeaderValue {
    /// Accepts the `random-ip` sentinel (any case) or a dotted-quad string.
    ///
    /// Only the shape of the address is checked; `300.1.1.1` is accepted.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case(RANDOM_IP_SENTINEL) {
            return Some(Self::RandomIp);
        }

        is_ipv4_syntax(s).then(|| Self::Literal(s.to_string()))
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RandomIp => f.write_str(RANDOM_IP_SENTINEL),
            Self::Literal(value) => f.write_str(value),
        }
    }
}

/// The header pair actually handed to the scanner for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHeader {
    pub name: String,
    pub value: String,
}

impl ResolvedHeader {
    /// Resolves `value` with the thread-local RNG.
    pub fn resolve(name: &str, value: &HeaderValue) -> Result<Self, AddressError> {
        Self::resolve_with(name, value, &mut rand::rng())
    }

    pub fn resolve_with<R: Rng + ?Sized>(
        name: &str,
        value: &HeaderValue,
        rng: &mut R,
    ) -> Result<Self, AddressError> {
        let resolved = resolve_header_value(value, rng)?;
        if *value == HeaderValue::RandomIp {
            info!("Generated random IP for {name}: {resolved}");
        }

        Ok(Self {
            name: name.to_string(),
            value: resolved,
        })
    }
}

impl fmt::Display for ResolvedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Returns a literal unchanged, or draws a fresh public address for the sentinel.
pub fn resolve_header_value<R: Rng + ?Sized>(
    value: &HeaderValue,
    rng: &mut R,
) -> Result<String, AddressError> {
    match value {
        HeaderValue::RandomIp => Ok(generate_public_ip(rng)?.to_string()),
        HeaderValue::Literal(literal) => Ok(literal.clone()),
    }
}

/// Checks the dotted-quad shape: four groups of one to three ASCII digits.
pub fn is_ipv4_syntax(s: &str) -> bool {
    IPV4_SYNTAX.is_match(s)
}

/// Returns `true` if `ip` must not be used as a spoofed client address.
///
/// The `>= 224` check lumps multicast, the reserved block and broadcast together.
pub fn is_excluded(ip: Ipv4Addr) -> bool {
    let [first, second, _, _] = ip.octets();

    first == 10
        || (first == 172 && (16..=31).contains(&second))
        || (first == 192 && second == 168)
        || first >= 224
        || DNS_RESOLVERS.contains(&ip)
}

/// Draws a uniformly distributed address that is not [excluded](is_excluded).
///
/// The first and last octets come from `1..=255`, the middle two from `0..=255`.
pub fn generate_public_ip<R: Rng + ?Sized>(rng: &mut R) -> Result<Ipv4Addr, AddressError> {
    generate_public_ip_within(rng, MAX_GENERATION_ATTEMPTS)
}

/// Rejection sampling with an explicit attempt budget.
pub fn generate_public_ip_within<R: Rng + ?Sized>(
    rng: &mut R,
    max_attempts: usize,
) -> Result<Ipv4Addr, AddressError> {
    for _ in 0..max_attempts {
        let candidate = Ipv4Addr::new(
            rng.random_range(1..=255),
            rng.random_range(0..=255),
            rng.random_range(0..=255),
            rng.random_range(1..=255),
        );

        if !is_excluded(candidate) {
            return Ok(candidate);
        }
    }

    Err(AddressError::Exhausted {
        attempts: max_attempts,
    })
}
