use crate::model::{Checksum, ChecksumAlgorithm};
use crate::spdx3::model::{Hash, HashAlgorithm};

/// SPDX 3 has no ADLER32; it becomes `OTHER`.
pub(super) fn bump_algorithm(algorithm: ChecksumAlgorithm) -> HashAlgorithm {
    match algorithm {
        ChecksumAlgorithm::Sha1 => HashAlgorithm::Sha1,
        ChecksumAlgorithm::Sha224 => HashAlgorithm::Sha224,
        ChecksumAlgorithm::Sha256 => HashAlgorithm::Sha256,
        ChecksumAlgorithm::Sha384 => HashAlgorithm::Sha384,
        ChecksumAlgorithm::Sha512 => HashAlgorithm::Sha512,
        ChecksumAlgorithm::Sha3_256 => HashAlgorithm::Sha3_256,
        ChecksumAlgorithm::Sha3_384 => HashAlgorithm::Sha3_384,
        ChecksumAlgorithm::Sha3_512 => HashAlgorithm::Sha3_512,
        ChecksumAlgorithm::Blake2b256 => HashAlgorithm::Blake2b256,
        ChecksumAlgorithm::Blake2b384 => HashAlgorithm::Blake2b384,
        ChecksumAlgorithm::Blake2b512 => HashAlgorithm::Blake2b512,
        ChecksumAlgorithm::Blake3 => HashAlgorithm::Blake3,
        ChecksumAlgorithm::Md2 => HashAlgorithm::Md2,
        ChecksumAlgorithm::Md4 => HashAlgorithm::Md4,
        ChecksumAlgorithm::Md5 => HashAlgorithm::Md5,
        ChecksumAlgorithm::Md6 => HashAlgorithm::Md6,
        ChecksumAlgorithm::Adler32 => HashAlgorithm::Other,
    }
}

pub(super) fn bump_checksum(checksum: &Checksum) -> Hash {
    Hash::new(bump_algorithm(checksum.algorithm), checksum.value.clone())
}
