use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hash algorithms accepted in SPDX 2 checksums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChecksumAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Blake2b256,
    Blake2b384,
    Blake2b512,
    Blake3,
    Md2,
    Md4,
    Md5,
    Md6,
    Adler32,
}

impl ChecksumAlgorithm {
    pub const ALL: [Self; 17] = [
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
        Self::Blake2b256,
        Self::Blake2b384,
        Self::Blake2b512,
        Self::Blake3,
        Self::Md2,
        Self::Md4,
        Self::Md5,
        Self::Md6,
        Self::Adler32,
    ];

    /// Name used by tag-value, JSON, YAML and XML.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha224 => "SHA224",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
            Self::Blake2b256 => "BLAKE2b-256",
            Self::Blake2b384 => "BLAKE2b-384",
            Self::Blake2b512 => "BLAKE2b-512",
            Self::Blake3 => "BLAKE3",
            Self::Md2 => "MD2",
            Self::Md4 => "MD4",
            Self::Md5 => "MD5",
            Self::Md6 => "MD6",
            Self::Adler32 => "ADLER32",
        }
    }

    /// Fragment of the `spdx:checksumAlgorithm_*` individual in RDF.
    #[must_use]
    pub fn rdf_fragment(&self) -> String {
        let lowered = match self {
            Self::Blake2b256 => "blake2b256".to_string(),
            Self::Blake2b384 => "blake2b384".to_string(),
            Self::Blake2b512 => "blake2b512".to_string(),
            other => other.as_str().replace('-', "_").to_lowercase(),
        };
        format!("checksumAlgorithm_{lowered}")
    }

    /// Parses an RDF fragment such as `checksumAlgorithm_sha3_256`.
    pub fn from_rdf_fragment(fragment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.rdf_fragment() == fragment)
    }

    /// Required number of hex digits; `None` where a range applies.
    #[must_use]
    pub const fn hex_length(&self) -> Option<usize> {
        match self {
            Self::Md2 | Self::Md4 | Self::Md5 => Some(32),
            Self::Sha1 => Some(40),
            Self::Sha224 => Some(56),
            Self::Sha256 | Self::Sha3_256 | Self::Blake2b256 => Some(64),
            Self::Sha384 | Self::Sha3_384 | Self::Blake2b384 => Some(96),
            Self::Sha512 | Self::Sha3_512 | Self::Blake2b512 => Some(128),
            Self::Adler32 => Some(8),
            Self::Blake3 | Self::Md6 => None,
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = String;

    /// Case-insensitive, with `-` and `_` interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-").to_uppercase();
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str().to_uppercase() == wanted)
            .ok_or_else(|| format!("Invalid ChecksumAlgorithm: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum {
    pub algorithm: ChecksumAlgorithm,
    pub value: String,
}

impl Checksum {
    pub fn new(algorithm: ChecksumAlgorithm, value: impl Into<String>) -> Self {
        Self {
            algorithm,
            value: value.into(),
        }
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.algorithm, self.value)
    }
}

impl FromStr for Checksum {
    type Err = String;

    /// Parses the tag-value form `SHA1: 85ed...`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (alg, value) = s
            .split_once(':')
            .ok_or_else(|| format!("Invalid checksum: {s}"))?;
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("Invalid checksum: {s}"));
        }
        Ok(Self::new(alg.parse()?, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for alg in ChecksumAlgorithm::ALL {
            assert_eq!(alg.as_str().parse::<ChecksumAlgorithm>().unwrap(), alg);
            assert_eq!(
                ChecksumAlgorithm::from_rdf_fragment(&alg.rdf_fragment()),
                Some(alg)
            );
        }
    }

    #[test]
    fn test_lenient_algorithm_names() {
        assert_eq!(
            "sha3_256".parse::<ChecksumAlgorithm>().unwrap(),
            ChecksumAlgorithm::Sha3_256
        );
        assert_eq!(
            "BLAKE2B-512".parse::<ChecksumAlgorithm>().unwrap(),
            ChecksumAlgorithm::Blake2b512
        );
    }

    #[test]
    fn test_rdf_fragments() {
        assert_eq!(ChecksumAlgorithm::Sha1.rdf_fragment(), "checksumAlgorithm_sha1");
        assert_eq!(
            ChecksumAlgorithm::Sha3_384.rdf_fragment(),
            "checksumAlgorithm_sha3_384"
        );
        assert_eq!(
            ChecksumAlgorithm::Blake2b256.rdf_fragment(),
            "checksumAlgorithm_blake2b256"
        );
    }

    #[test]
    fn test_parse_tag_value_checksum() {
        let c: Checksum = "SHA1: 85ed0817af83a24ad8da68c2b5094de69833983c".parse().unwrap();
        assert_eq!(c.algorithm, ChecksumAlgorithm::Sha1);
        assert_eq!(c.value, "85ed0817af83a24ad8da68c2b5094de69833983c");
        assert!("SHA1:".parse::<Checksum>().is_err());
        assert!("CRC: 12".parse::<Checksum>().is_err());
    }
}
