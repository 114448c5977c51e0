//! Input validation for resize requests

use crate::common::error::{Error, Result};

/// Validate a target size string.
///
/// The accepted grammar is a positive integer magnitude followed by a single
/// unit suffix, e.g. `512M`, `20G`, `2T`. Pure check, touches neither peers
/// nor storage.
pub fn validate_size(size: &str) -> Result<()> {
    if size.is_empty() {
        return Err(Error::Input("target size must not be empty".into()));
    }
    if !size.is_ascii() {
        return Err(Error::Input(format!("invalid target size '{}'", size)));
    }

    let (magnitude, unit) = size.split_at(size.len() - 1);
    if !matches!(unit, "M" | "G" | "T") {
        return Err(Error::Input(format!(
            "unknown size unit '{}' (expected M, G or T)",
            unit
        )));
    }

    let value: u64 = magnitude
        .parse()
        .map_err(|_| Error::Input(format!("invalid size magnitude '{}'", magnitude)))?;
    if value == 0 {
        return Err(Error::Input(
            "size magnitude must be greater than zero".into(),
        ));
    }

    Ok(())
}

/// Validate a volume name.
///
/// Names are spliced into device paths and shell command lines, so only a
/// conservative character set is allowed.
pub fn validate_volume_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::Input("volume name must not be empty".into()));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(Error::Input(format!(
            "volume name '{}' contains invalid characters",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_size_accepts_grammar() {
        assert!(validate_size("20G").is_ok());
        assert!(validate_size("512M").is_ok());
        assert!(validate_size("2T").is_ok());
        assert!(validate_size("1G").is_ok());
    }

    #[test]
    fn test_validate_size_rejects_empty() {
        assert!(validate_size("").is_err());
    }

    #[test]
    fn test_validate_size_rejects_bad_unit() {
        assert!(validate_size("20K").is_err());
        assert!(validate_size("20").is_err());
        assert!(validate_size("20g").is_err());
    }

    #[test]
    fn test_validate_size_rejects_bad_magnitude() {
        assert!(validate_size("G").is_err());
        assert!(validate_size("abcG").is_err());
        assert!(validate_size("0G").is_err());
        assert!(validate_size("-5G").is_err());
        assert!(validate_size("2.5G").is_err());
        assert!(validate_size("20 G").is_err());
    }

    #[test]
    fn test_validate_volume_name() {
        assert!(validate_volume_name("myvol").is_ok());
        assert!(validate_volume_name("pv-web_01.a").is_ok());
        assert!(validate_volume_name("").is_err());
        assert!(validate_volume_name("my vol").is_err());
        assert!(validate_volume_name("my;vol").is_err());
        assert!(validate_volume_name("vol/../etc").is_err());
    }
}
