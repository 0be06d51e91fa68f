//! Checksum helpers for producing documents.

use super::{ChecksumAlgorithm, File, PackageVerificationCode};
use crate::error::{Result, SpdxError};
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use std::path::Path;

/// Computes the package verification code over `files`.
///
/// The SHA1 values of all files not listed in `excluded_files` are sorted,
/// concatenated and hashed with SHA1 again. Files without a SHA1 checksum
/// make the computation fail.
pub fn calculate_package_verification_code(
    files: &[File],
    excluded_files: &[String],
) -> std::result::Result<PackageVerificationCode, String> {
    let mut hashes = Vec::with_capacity(files.len());
    for file in files {
        if excluded_files.iter().any(|excluded| *excluded == file.name) {
            continue;
        }
        let sha1 = file
            .sha1()
            .ok_or_else(|| format!("file {} has no SHA1 checksum", file.name))?;
        hashes.push(sha1.to_lowercase());
    }
    hashes.sort();

    let mut hasher = Sha1::new();
    hasher.update(hashes.concat().as_bytes());
    Ok(PackageVerificationCode {
        value: hex::encode(hasher.finalize()),
        excluded_files: excluded_files.to_vec(),
    })
}

/// Hashes the file at `path`.
pub fn calculate_file_checksum(path: &Path, algorithm: ChecksumAlgorithm) -> Result<String> {
    let content = std::fs::read(path).map_err(|e| SpdxError::io(path, e))?;
    let digest = match algorithm {
        ChecksumAlgorithm::Sha1 => hex::encode(Sha1::digest(&content)),
        ChecksumAlgorithm::Sha224 => hex::encode(Sha224::digest(&content)),
        ChecksumAlgorithm::Sha256 => hex::encode(Sha256::digest(&content)),
        ChecksumAlgorithm::Sha384 => hex::encode(Sha384::digest(&content)),
        ChecksumAlgorithm::Sha512 => hex::encode(Sha512::digest(&content)),
        other => return Err(SpdxError::UnsupportedAlgorithm(other.to_string())),
    };
    Ok(digest)
}
