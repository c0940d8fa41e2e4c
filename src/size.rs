//! Parsing of human-written byte sizes

use crate::error::{Result, SizetreeError};

const KIB: u64 = 1024;

/// Parse a size string like "10000000", "512K", "5M", "1G" into bytes.
/// Supports suffixes: K/KB (1024), M/MB (1024^2), G/GB (1024^3), T/TB (1024^4)
/// Without suffix, interprets as bytes.
pub fn parse_size(s: &str) -> Result<u64> {
    let upper = s.trim().to_uppercase();
    let (num_str, multiplier) = split_suffix(&upper);

    let invalid = |reason: String| SizetreeError::InvalidLimit {
        value: s.to_string(),
        reason,
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| invalid(format!("invalid number: {}", num_str.trim())))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| invalid("size too large".to_string()))
}

fn split_suffix(s: &str) -> (&str, u64) {
    const SUFFIXES: [(&str, u64); 8] = [
        ("TB", KIB * KIB * KIB * KIB),
        ("T", KIB * KIB * KIB * KIB),
        ("GB", KIB * KIB * KIB),
        ("G", KIB * KIB * KIB),
        ("MB", KIB * KIB),
        ("M", KIB * KIB),
        ("KB", KIB),
        ("K", KIB),
    ];
    for (suffix, multiplier) in SUFFIXES {
        if let Some(n) = s.strip_suffix(suffix) {
            return (n, multiplier);
        }
    }
    (s, 1)
}
